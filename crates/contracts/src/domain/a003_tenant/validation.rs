use super::aggregate::{TenantDraft, TenantField, TenantPayload};
use crate::shared::validation::{is_valid_email, ValidationResult, ValidationRules};

const NAME: ValidationRules = ValidationRules::required().length(2, 100);
const PHONE: ValidationRules = ValidationRules::none().length(7, 20);
const ADMIN_USERNAME: ValidationRules = ValidationRules::required().length(3, 50);
const PASSWORD: ValidationRules = ValidationRules::required().length(8, 128);

/// Validate a tenant draft. Admin credentials are checked on create only.
pub fn validate_tenant(draft: &TenantDraft) -> ValidationResult {
    let mut result = ValidationResult::new();

    result.check(TenantField::Name.name(), NAME.validate_string(&draft.name, "El nombre"));

    if draft.email.trim().is_empty() {
        result.add(TenantField::Email.name(), "El email es obligatorio");
    } else if !is_valid_email(&draft.email) {
        result.add(TenantField::Email.name(), "El email no es válido");
    }

    let phone = draft.phone.trim();
    if result
        .check(TenantField::Phone.name(), PHONE.validate_string(phone, "El teléfono"))
        .is_some()
        && !phone
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | ' '))
    {
        result.add(
            TenantField::Phone.name(),
            "El teléfono solo puede contener dígitos, espacios, + y -",
        );
    }

    if !draft.is_edit_mode() {
        result.check(
            TenantField::AdminUsername.name(),
            ADMIN_USERNAME.validate_string(&draft.admin_username, "El usuario administrador"),
        );
        result.check(
            TenantField::AdminPassword.name(),
            PASSWORD.validate_string(&draft.admin_password, "La contraseña"),
        );
        if draft.admin_password != draft.confirm_password {
            result.add(
                TenantField::ConfirmPassword.name(),
                "Las contraseñas no coinciden",
            );
        }
    }

    result
}

impl TenantDraft {
    pub fn to_payload(&self) -> Result<TenantPayload, ValidationResult> {
        validate_tenant(self).into_result()?;

        let phone = self.phone.trim();
        let creating = !self.is_edit_mode();
        Ok(TenantPayload {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: (!phone.is_empty()).then(|| phone.to_string()),
            active: self.active,
            admin_username: creating.then(|| self.admin_username.trim().to_string()),
            admin_password: creating.then(|| self.admin_password.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_tenant() -> TenantDraft {
        TenantDraft {
            name: "Acme Servicios".into(),
            email: "ops@acme.com".into(),
            admin_username: "acme-admin".into(),
            admin_password: "s3cretos!".into(),
            confirm_password: "s3cretos!".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_password_confirmation_must_match() {
        let draft = TenantDraft {
            confirm_password: "otra-cosa".into(),
            ..new_tenant()
        };
        let result = validate_tenant(&draft);
        assert!(!result.is_valid);
        assert_eq!(
            result.error("confirmPassword"),
            Some("Las contraseñas no coinciden")
        );
    }

    #[test]
    fn test_edit_skips_admin_fields() {
        let draft = TenantDraft {
            id: Some("t1".into()),
            admin_username: String::new(),
            admin_password: String::new(),
            confirm_password: "x".into(),
            ..new_tenant()
        };
        let payload = draft.to_payload().unwrap();
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("adminPassword").is_none());
        assert_eq!(json["activo"], true);
    }

    #[test]
    fn test_phone_rules() {
        let mut draft = new_tenant();
        draft.phone = "+51 999-888-777".into();
        assert!(validate_tenant(&draft).is_valid);
        draft.phone = "llamar luego".into();
        assert!(validate_tenant(&draft).error("telefono").is_some());
    }

    #[test]
    fn test_create_payload_carries_admin() {
        let json = serde_json::to_value(new_tenant().to_payload().unwrap()).unwrap();
        assert_eq!(json["adminUsername"], "acme-admin");
        assert!(json.get("telefono").is_none());
    }
}
