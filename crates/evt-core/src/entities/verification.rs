use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// Number of digit slots in an emailed verification code.
pub const CODE_LENGTH: usize = 4;

/// Four single-digit slots typed one at a time.
///
/// Every slot holds either an empty string or exactly one ASCII digit. Typing
/// into a slot moves focus forward, clearing a slot moves it back, so the
/// struct also tracks which slot has focus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationCode {
    slots: [String; CODE_LENGTH],
    focus: usize,
}

impl VerificationCode {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply the new value of `slot` and return the slot that receives focus.
    ///
    /// An empty value clears the slot and retreats to the previous one; a
    /// digit fills it and advances to the next one. Focus stays put at either
    /// end.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::SlotOutOfRange`] for a slot past the end and
    /// [`ValidationError::InvalidDigit`] for anything but one digit. The code
    /// is left unchanged on error.
    pub fn input(&mut self, slot: usize, value: &str) -> Result<usize, ValidationError> {
        if slot >= CODE_LENGTH {
            return Err(ValidationError::SlotOutOfRange(slot));
        }

        if value.is_empty() {
            self.slots[slot].clear();
            self.focus = slot.saturating_sub(1);
            return Ok(self.focus);
        }

        let mut chars = value.chars();
        match (chars.next(), chars.next()) {
            (Some(digit), None) if digit.is_ascii_digit() => {
                self.slots[slot] = digit.to_string();
                self.focus = (slot + 1).min(CODE_LENGTH - 1);
                Ok(self.focus)
            }
            _ => Err(ValidationError::InvalidDigit {
                slot,
                value: value.to_string(),
            }),
        }
    }

    /// Type `digit` into the slot that currently has focus.
    ///
    /// # Errors
    ///
    /// See [`VerificationCode::input`].
    pub fn type_digit(&mut self, digit: char) -> Result<usize, ValidationError> {
        let mut buf = [0u8; 4];
        self.input(self.focus, digit.encode_utf8(&mut buf))
    }

    /// Clear `slot`, retreating focus.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::SlotOutOfRange`] for a slot past the end.
    pub fn clear(&mut self, slot: usize) -> Result<usize, ValidationError> {
        self.input(slot, "")
    }

    /// Move focus explicitly, e.g. when the user clicks a slot.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::SlotOutOfRange`] for a slot past the end.
    pub fn focus_slot(&mut self, slot: usize) -> Result<(), ValidationError> {
        if slot >= CODE_LENGTH {
            return Err(ValidationError::SlotOutOfRange(slot));
        }
        self.focus = slot;
        Ok(())
    }

    #[must_use]
    pub const fn focus(&self) -> usize {
        self.focus
    }

    #[must_use]
    pub fn slot(&self, slot: usize) -> Option<&str> {
        self.slots.get(slot).map(String::as_str)
    }

    #[must_use]
    pub fn slots(&self) -> &[String; CODE_LENGTH] {
        &self.slots
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(|slot| slot.len() == 1)
    }

    /// Slots 0..3 concatenated in order.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::IncompleteCode`] while any slot is empty.
    pub fn code(&self) -> Result<String, ValidationError> {
        if !self.is_complete() {
            return Err(ValidationError::IncompleteCode);
        }
        Ok(self.slots.concat())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn typing_four_digits_in_order_yields_code() {
        let mut code = VerificationCode::new();
        for (slot, digit) in ["1", "2", "3", "4"].into_iter().enumerate() {
            code.input(slot, digit).expect("digit accepted");
        }
        assert_eq!(code.code().expect("complete"), "1234");
    }

    #[test]
    fn typing_advances_focus_until_last_slot() {
        let mut code = VerificationCode::new();
        assert_eq!(code.input(0, "1"), Ok(1));
        assert_eq!(code.input(1, "2"), Ok(2));
        assert_eq!(code.input(2, "3"), Ok(3));
        assert_eq!(code.input(3, "4"), Ok(3));
    }

    #[test]
    fn clearing_slot_two_moves_focus_to_slot_one() {
        let mut code = VerificationCode::new();
        for digit in ['5', '6', '7', '8'] {
            code.type_digit(digit).expect("digit accepted");
        }
        assert_eq!(code.clear(2), Ok(1));
        assert_eq!(code.slot(2), Some(""));
        assert_eq!(code.focus(), 1);
    }

    #[test]
    fn clearing_first_slot_keeps_focus_there() {
        let mut code = VerificationCode::new();
        code.input(0, "9").expect("digit");
        assert_eq!(code.clear(0), Ok(0));
    }

    #[test]
    fn non_digit_is_rejected_without_change() {
        let mut code = VerificationCode::new();
        code.input(0, "1").expect("digit");
        let before = code.clone();

        assert!(matches!(
            code.input(1, "a"),
            Err(ValidationError::InvalidDigit { slot: 1, .. })
        ));
        assert!(matches!(
            code.input(1, "12"),
            Err(ValidationError::InvalidDigit { slot: 1, .. })
        ));
        assert_eq!(code, before);
    }

    #[test]
    fn slot_past_end_is_rejected() {
        let mut code = VerificationCode::new();
        assert_eq!(code.input(4, "1"), Err(ValidationError::SlotOutOfRange(4)));
        assert_eq!(code.focus_slot(7), Err(ValidationError::SlotOutOfRange(7)));
    }

    #[test]
    fn incomplete_code_cannot_be_submitted() {
        let mut code = VerificationCode::new();
        code.input(0, "1").expect("digit");
        code.input(1, "2").expect("digit");
        assert_eq!(code.code(), Err(ValidationError::IncompleteCode));
    }

    #[test]
    fn type_digit_uses_focused_slot() {
        let mut code = VerificationCode::new();
        code.focus_slot(2).expect("focus");
        code.type_digit('4').expect("digit");
        assert_eq!(code.slot(2), Some("4"));
        assert_eq!(code.focus(), 3);
    }
}
