use contracts::domain::a001_work_order::{
    CompletionDraft, CompletionField, WorkOrderDraft, WorkOrderField,
};
use contracts::domain::a003_tenant::{TenantDraft, TenantField};
use contracts::shared::validation::ValidationResult;
use std::collections::{BTreeMap, HashSet};

/// Returned by submit handlers when validation failed (errors are in the form)
pub const MSG_INVALID_FORM: &str = "Revise los campos marcados";
/// Returned when a submit is attempted while another is in flight
pub const MSG_BUSY: &str = "Ya hay un envío en curso";

/// A typed draft editable field-by-field
pub trait FormDraft: Clone + Default {
    type Field: Copy + Eq + std::hash::Hash;

    fn set_field(&mut self, field: Self::Field, value: &str) -> Result<(), String>;
    fn field_name(field: Self::Field) -> &'static str;
    fn fields() -> Vec<Self::Field>;
}

impl FormDraft for WorkOrderDraft {
    type Field = WorkOrderField;

    fn set_field(&mut self, field: WorkOrderField, value: &str) -> Result<(), String> {
        WorkOrderDraft::set_field(self, field, value)
    }

    fn field_name(field: WorkOrderField) -> &'static str {
        field.name()
    }

    fn fields() -> Vec<WorkOrderField> {
        WorkOrderField::all().to_vec()
    }
}

impl FormDraft for CompletionDraft {
    type Field = CompletionField;

    fn set_field(&mut self, field: CompletionField, value: &str) -> Result<(), String> {
        CompletionDraft::set_field(self, field, value)
    }

    fn field_name(field: CompletionField) -> &'static str {
        field.name()
    }

    fn fields() -> Vec<CompletionField> {
        CompletionField::all().to_vec()
    }
}

impl FormDraft for TenantDraft {
    type Field = TenantField;

    fn set_field(&mut self, field: TenantField, value: &str) -> Result<(), String> {
        TenantDraft::set_field(self, field, value)
    }

    fn field_name(field: TenantField) -> &'static str {
        field.name()
    }

    fn fields() -> Vec<TenantField> {
        TenantField::all().to_vec()
    }
}

/// Draft + per-field errors + touched set + in-flight flag.
///
/// Errors are kept for every field but only shown for touched ones.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState<D: FormDraft> {
    pub draft: D,
    errors: BTreeMap<String, String>,
    touched: HashSet<&'static str>,
    pub submitting: bool,
}

impl<D: FormDraft> Default for FormState<D> {
    fn default() -> Self {
        Self {
            draft: D::default(),
            errors: BTreeMap::new(),
            touched: HashSet::new(),
            submitting: false,
        }
    }
}

impl<D: FormDraft> FormState<D> {
    /// Replace the draft (e.g. when opening an edit modal)
    pub fn load(&mut self, draft: D) {
        *self = Self {
            draft,
            ..Self::default()
        };
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Apply an input change. A successful change clears the field's error.
    pub fn change(&mut self, field: D::Field, value: &str) {
        let name = D::field_name(field);
        self.touched.insert(name);
        match self.draft.set_field(field, value) {
            Ok(()) => {
                self.errors.remove(name);
            }
            Err(message) => {
                self.errors.insert(name.to_string(), message);
            }
        }
    }

    /// Mark a field as touched without changing it (on blur)
    pub fn touch(&mut self, field: D::Field) {
        self.touched.insert(D::field_name(field));
    }

    /// Store validator output and reveal every error
    pub fn apply_validation(&mut self, result: ValidationResult) {
        self.errors = result.errors;
        for field in D::fields() {
            self.touched.insert(D::field_name(field));
        }
    }

    /// Error to display for a field: only once the field was touched
    pub fn visible_error(&self, field: D::Field) -> Option<String> {
        let name = D::field_name(field);
        if self.touched.contains(name) {
            self.errors.get(name).cloned()
        } else {
            None
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_work_order::validate_work_order;

    #[test]
    fn test_errors_hidden_until_touched() {
        let mut form = FormState::<WorkOrderDraft>::default();
        let result = validate_work_order(&form.draft);
        assert!(!result.is_valid);

        form.errors = result.errors.clone();
        assert_eq!(form.visible_error(WorkOrderField::Title), None);

        form.touch(WorkOrderField::Title);
        assert!(form.visible_error(WorkOrderField::Title).is_some());
        assert_eq!(form.visible_error(WorkOrderField::Description), None);
    }

    #[test]
    fn test_apply_validation_reveals_all() {
        let mut form = FormState::<WorkOrderDraft>::default();
        form.apply_validation(validate_work_order(&form.draft));
        assert!(form.visible_error(WorkOrderField::Title).is_some());
        assert!(form.visible_error(WorkOrderField::InstallationId).is_some());
    }

    #[test]
    fn test_change_clears_field_error() {
        let mut form = FormState::<WorkOrderDraft>::default();
        form.apply_validation(validate_work_order(&form.draft));

        form.change(WorkOrderField::Title, "Revisión caldera");

        assert_eq!(form.draft.title, "Revisión caldera");
        assert_eq!(form.visible_error(WorkOrderField::Title), None);
        assert!(form.visible_error(WorkOrderField::Description).is_some());
    }

    #[test]
    fn test_bad_enum_input_becomes_field_error() {
        let mut form = FormState::<WorkOrderDraft>::default();
        form.change(WorkOrderField::Priority, "urgentisima");
        assert!(form.visible_error(WorkOrderField::Priority).is_some());
    }

    #[test]
    fn test_load_resets_errors_and_touched() {
        let mut form = FormState::<TenantDraft>::default();
        form.change(TenantField::Active, "tal vez");
        form.submitting = true;

        form.load(TenantDraft {
            id: Some("t1".into()),
            ..Default::default()
        });

        assert!(!form.has_errors());
        assert!(!form.submitting);
        assert!(form.draft.is_edit_mode());
    }
}
