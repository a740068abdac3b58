//! Transfer form - field state, client-side validation, submission lifecycle
//!
//! Linear flow: idle -> validating -> submitting -> result -> idle.
//! Validation is advisory; the server re-checks every rule and stays the
//! authority on balances and blocks.

use crate::api::{Account, CreateTransactionRequest, CreateTransactionResponse, SubmitOutcome};
use crate::notifications::NotificationLevel;

/// Focusable form fields, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Sender,
    Receiver,
    Amount,
    Description,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            Self::Sender => Self::Receiver,
            Self::Receiver => Self::Amount,
            Self::Amount => Self::Description,
            Self::Description => Self::Sender,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Sender => Self::Description,
            Self::Receiver => Self::Sender,
            Self::Amount => Self::Receiver,
            Self::Description => Self::Amount,
        }
    }
}

/// Submission phase. The submit control is enabled only in `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitState {
    Idle,
    Submitting,
}

/// Result card shown under the form after a server round-trip
#[derive(Debug, Clone)]
pub enum FormOutcome {
    Accepted(Box<CreateTransactionResponse>),
    Rejected {
        error: String,
        reason: Option<String>,
    },
}

/// Client-side validation failures, each with its toast text and severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    MissingFields,
    InvalidAmount,
    SameAccount,
    SenderBlocked,
    InsufficientFunds,
}

impl ValidationError {
    pub fn message(&self) -> &'static str {
        match self {
            Self::MissingFields => "Заполните все обязательные поля",
            Self::InvalidAmount => "Введите корректную сумму",
            Self::SameAccount => "Отправитель и получатель не могут совпадать",
            Self::SenderBlocked => "Счёт отправителя заблокирован",
            Self::InsufficientFunds => "Недостаточно средств на счёте",
        }
    }

    pub fn level(&self) -> NotificationLevel {
        match self {
            Self::InsufficientFunds | Self::SenderBlocked => NotificationLevel::Danger,
            _ => NotificationLevel::Warning,
        }
    }
}

const MAX_DESCRIPTION_CHARS: usize = 200;

/// Transfer form state
#[derive(Debug, Clone)]
pub struct CreateForm {
    /// Indexes into the cached account list
    pub sender_idx: Option<usize>,
    pub receiver_idx: Option<usize>,
    pub amount: String,
    pub description: String,
    pub focus: FormField,
    pub state: SubmitState,
    pub outcome: Option<FormOutcome>,
}

impl CreateForm {
    pub fn new() -> Self {
        Self {
            sender_idx: None,
            receiver_idx: None,
            amount: String::new(),
            description: String::new(),
            focus: FormField::Sender,
            state: SubmitState::Idle,
            outcome: None,
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.state == SubmitState::Submitting
    }

    /// Validate against the cached accounts and build the request body.
    /// Comma decimals are accepted the way the form's users type them.
    pub fn validate(&self, accounts: &[Account]) -> Result<CreateTransactionRequest, ValidationError> {
        let sender = self.sender_idx.and_then(|i| accounts.get(i));
        let receiver = self.receiver_idx.and_then(|i| accounts.get(i));

        let (sender, receiver) = match (sender, receiver) {
            (Some(s), Some(r)) => (s, r),
            _ => return Err(ValidationError::MissingFields),
        };

        let raw_amount = self.amount.trim();
        if raw_amount.is_empty() {
            return Err(ValidationError::MissingFields);
        }
        let amount: f64 = raw_amount
            .replace(',', ".")
            .parse()
            .map_err(|_| ValidationError::InvalidAmount)?;
        if !amount.is_finite() || amount <= 0.0 {
            return Err(ValidationError::InvalidAmount);
        }

        if sender.account_id == receiver.account_id {
            return Err(ValidationError::SameAccount);
        }
        if sender.is_blocked {
            return Err(ValidationError::SenderBlocked);
        }
        if amount > sender.balance {
            return Err(ValidationError::InsufficientFunds);
        }

        Ok(CreateTransactionRequest {
            sender_account_id: sender.account_id,
            receiver_account_id: receiver.account_id,
            amount,
            description: self.description.trim().to_string(),
        })
    }

    /// Enter the submitting phase: the submit control goes disabled
    pub fn begin_submit(&mut self) {
        self.state = SubmitState::Submitting;
        self.outcome = None;
    }

    /// Apply the server verdict. Always returns the form to `Idle`;
    /// returns true when the transaction was accepted, in which case the
    /// amount and description fields are cleared.
    pub fn apply_outcome(&mut self, outcome: SubmitOutcome) -> bool {
        self.state = SubmitState::Idle;
        match outcome {
            SubmitOutcome::Accepted(resp) => {
                self.amount.clear();
                self.description.clear();
                self.outcome = Some(FormOutcome::Accepted(Box::new(resp)));
                true
            }
            SubmitOutcome::Rejected { error, reason } => {
                self.outcome = Some(FormOutcome::Rejected { error, reason });
                false
            }
        }
    }

    /// Transport failure: no result card, just re-enable the control
    pub fn abort_submission(&mut self) {
        self.state = SubmitState::Idle;
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Move the focused selector one entry up
    pub fn select_prev(&mut self, accounts_len: usize) {
        let slot = match self.focus {
            FormField::Sender => &mut self.sender_idx,
            FormField::Receiver => &mut self.receiver_idx,
            _ => return,
        };
        if accounts_len == 0 {
            return;
        }
        *slot = Some(match *slot {
            Some(i) if i > 0 => i - 1,
            Some(i) => i,
            None => 0,
        });
    }

    /// Move the focused selector one entry down
    pub fn select_next(&mut self, accounts_len: usize) {
        let slot = match self.focus {
            FormField::Sender => &mut self.sender_idx,
            FormField::Receiver => &mut self.receiver_idx,
            _ => return,
        };
        if accounts_len == 0 {
            return;
        }
        *slot = Some(match *slot {
            Some(i) if i + 1 < accounts_len => i + 1,
            Some(i) => i,
            None => 0,
        });
    }

    /// Route a typed character into the focused text field
    pub fn input_char(&mut self, c: char) {
        match self.focus {
            FormField::Amount => {
                let is_separator = (c == '.' || c == ',')
                    && !self.amount.contains('.')
                    && !self.amount.contains(',');
                if c.is_ascii_digit() || is_separator {
                    self.amount.push(c);
                }
            }
            FormField::Description => {
                if !c.is_control() && self.description.chars().count() < MAX_DESCRIPTION_CHARS {
                    self.description.push(c);
                }
            }
            _ => {}
        }
    }

    pub fn backspace(&mut self) {
        match self.focus {
            FormField::Amount => {
                self.amount.pop();
            }
            FormField::Description => {
                self.description.pop();
            }
            _ => {}
        }
    }

    /// Drop selector indexes that no longer point into the account list
    pub fn clamp_selection(&mut self, accounts_len: usize) {
        if self.sender_idx.is_some_and(|i| i >= accounts_len) {
            self.sender_idx = None;
        }
        if self.receiver_idx.is_some_and(|i| i >= accounts_len) {
            self.receiver_idx = None;
        }
    }
}

impl Default for CreateForm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::FraudCheck;

    fn account(id: i64, balance: f64, blocked: bool) -> Account {
        Account {
            account_id: id,
            account_number: format!("4081781000000000000{}", id),
            account_type: None,
            balance,
            currency: Some("RUB".to_string()),
            client_id: id * 10,
            first_name: "Тест".to_string(),
            last_name: format!("Клиент{}", id),
            risk_level: 0.0,
            is_blocked: blocked,
        }
    }

    fn filled_form() -> CreateForm {
        let mut form = CreateForm::new();
        form.sender_idx = Some(0);
        form.receiver_idx = Some(1);
        form.amount = "1000".to_string();
        form.description = "обед".to_string();
        form
    }

    #[test]
    fn test_validate_missing_fields() {
        let accounts = vec![account(1, 5000.0, false), account(2, 100.0, false)];
        let mut form = CreateForm::new();
        assert_eq!(form.validate(&accounts), Err(ValidationError::MissingFields));

        form.sender_idx = Some(0);
        form.receiver_idx = Some(1);
        form.amount = "   ".to_string();
        assert_eq!(form.validate(&accounts), Err(ValidationError::MissingFields));
    }

    #[test]
    fn test_validate_same_account() {
        let accounts = vec![account(1, 5000.0, false), account(2, 100.0, false)];
        let mut form = filled_form();
        form.receiver_idx = Some(0);
        assert_eq!(form.validate(&accounts), Err(ValidationError::SameAccount));
    }

    #[test]
    fn test_validate_insufficient_funds() {
        let accounts = vec![account(1, 500.0, false), account(2, 100.0, false)];
        let form = filled_form();
        assert_eq!(
            form.validate(&accounts),
            Err(ValidationError::InsufficientFunds)
        );
    }

    #[test]
    fn test_validate_amount_equal_to_balance_passes() {
        let accounts = vec![account(1, 1000.0, false), account(2, 100.0, false)];
        let form = filled_form();
        assert!(form.validate(&accounts).is_ok());
    }

    #[test]
    fn test_validate_blocked_sender() {
        let accounts = vec![account(1, 5000.0, true), account(2, 100.0, false)];
        let form = filled_form();
        assert_eq!(form.validate(&accounts), Err(ValidationError::SenderBlocked));
    }

    #[test]
    fn test_validate_comma_decimal_amount() {
        let accounts = vec![account(1, 5000.0, false), account(2, 100.0, false)];
        let mut form = filled_form();
        form.amount = "999,50".to_string();
        let request = form.validate(&accounts).unwrap();
        assert_eq!(request.amount, 999.5);
    }

    #[test]
    fn test_validate_garbage_amount() {
        let accounts = vec![account(1, 5000.0, false), account(2, 100.0, false)];
        let mut form = filled_form();
        form.amount = "сто".to_string();
        assert_eq!(form.validate(&accounts), Err(ValidationError::InvalidAmount));
        form.amount = "-5".to_string();
        assert_eq!(form.validate(&accounts), Err(ValidationError::InvalidAmount));
    }

    #[test]
    fn test_accepted_outcome_clears_fields_and_reenables() {
        let accounts = vec![account(1, 5000.0, false), account(2, 100.0, false)];
        let mut form = filled_form();
        form.begin_submit();
        assert!(form.is_submitting());

        let resp = CreateTransactionResponse {
            success: true,
            transaction_id: 55,
            transaction_date: None,
            status: "completed".to_string(),
            message: "Транзакция успешно выполнена".to_string(),
            fraud_check: FraudCheck {
                score: 0.1,
                is_flagged: false,
                reason: None,
                flags: vec![],
            },
        };
        let accepted = form.apply_outcome(SubmitOutcome::Accepted(resp));

        assert!(accepted);
        assert_eq!(form.state, SubmitState::Idle);
        assert!(form.amount.is_empty());
        assert!(form.description.is_empty());
        assert!(matches!(form.outcome, Some(FormOutcome::Accepted(_))));
    }

    #[test]
    fn test_rejected_outcome_keeps_fields() {
        let accounts = vec![account(1, 5000.0, false), account(2, 100.0, false)];
        let mut form = filled_form();
        form.begin_submit();

        let accepted = form.apply_outcome(SubmitOutcome::Rejected {
            error: "Transaction blocked".to_string(),
            reason: Some("Sender client is blocked".to_string()),
        });

        assert!(!accepted);
        assert_eq!(form.state, SubmitState::Idle);
        assert_eq!(form.amount, "1000");
        assert!(matches!(form.outcome, Some(FormOutcome::Rejected { .. })));
    }

    #[test]
    fn test_abort_reenables_without_result_card() {
        let mut form = CreateForm::new();
        form.begin_submit();
        form.abort_submission();
        assert_eq!(form.state, SubmitState::Idle);
        assert!(form.outcome.is_none());
    }

    #[test]
    fn test_amount_input_single_separator() {
        let mut form = CreateForm::new();
        form.focus = FormField::Amount;
        for c in "12,5,0.x7".chars() {
            form.input_char(c);
        }
        assert_eq!(form.amount, "12,507");
    }

    #[test]
    fn test_selector_navigation_clamps() {
        let mut form = CreateForm::new();
        form.focus = FormField::Sender;
        form.select_next(2);
        assert_eq!(form.sender_idx, Some(0));
        form.select_next(2);
        form.select_next(2);
        assert_eq!(form.sender_idx, Some(1));
        form.select_prev(2);
        assert_eq!(form.sender_idx, Some(0));
    }
}
