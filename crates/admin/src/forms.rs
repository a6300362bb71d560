//! Form drafts, validation, and write-path normalization.
//!
//! The API treats an empty string and `null` differently for relational
//! columns, so every write goes through one explicit sanitation pass: the
//! raw select values (empty string = no selection) and blank text inputs
//! are mapped onto typed `Option`s that serialize as `null`. The pass is
//! centralized here instead of being repeated per form.

use casita_azul_core::{AgentId, CatalogItemId, Email, Property, Role};

use crate::error::PageError;

/// Minimum password length accepted by the login/registration forms.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Raw values of the property form's foreign-key dropdowns.
///
/// One field per relational column; an empty string is an empty selection.
/// This is the enumerated field list the normalization pass walks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FkSelections {
    pub tipo_negocio_id: String,
    pub tipo_propiedad_id: String,
    pub estado_publicacion_id: String,
    pub moneda_id: String,
    pub frecuencia_alquiler_id: String,
    pub estado_fisico_id: String,
    pub estado_id: String,
    pub ciudad_id: String,
    pub zona_id: String,
    pub captado_por_agente_id: String,
    pub agente_id: String,
    pub agente_externo_id: String,
    pub validado_por_usuario_id: String,
}

impl FkSelections {
    /// Pre-fill the dropdowns from an existing record.
    #[must_use]
    pub fn from_property(property: &Property) -> Self {
        fn select<T: ToString>(value: Option<T>) -> String {
            value.map(|v| v.to_string()).unwrap_or_default()
        }

        Self {
            tipo_negocio_id: select(property.tipo_negocio_id),
            tipo_propiedad_id: select(property.tipo_propiedad_id),
            estado_publicacion_id: select(property.estado_publicacion_id),
            moneda_id: select(property.moneda_id),
            frecuencia_alquiler_id: select(property.frecuencia_alquiler_id),
            estado_fisico_id: select(property.estado_fisico_id),
            estado_id: select(property.estado_id),
            ciudad_id: select(property.ciudad_id),
            zona_id: select(property.zona_id),
            captado_por_agente_id: select(property.captado_por_agente_id),
            agente_id: select(property.agente_id),
            agente_externo_id: select(property.agente_externo_id),
            validado_por_usuario_id: select(property.validado_por_usuario_id),
        }
    }
}

/// The scratch copy of a property under edit, plus its form bindings.
///
/// Created by deep-copying the displayed record (images included) when an
/// edit session starts, so in-progress edits never leak into the list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyDraft {
    pub scratch: Property,
    pub selects: FkSelections,
}

impl PropertyDraft {
    /// Blank draft for add mode.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Draft seeded from an existing record (edit mode).
    #[must_use]
    pub fn from_property(property: &Property) -> Self {
        Self {
            scratch: property.clone(),
            selects: FkSelections::from_property(property),
        }
    }

    /// Client-side validation. On failure nothing may be transmitted.
    ///
    /// # Errors
    ///
    /// Returns `PageError::Validation` listing every failed rule.
    pub fn validate(&self) -> Result<(), PageError> {
        let mut problems = Vec::new();

        if self.scratch.titulo.trim().is_empty() {
            problems.push("titulo is required".to_string());
        }

        for (field, raw) in self.select_fields() {
            if !raw.is_empty() && raw.parse::<i32>().is_err() {
                problems.push(format!("{field} must be a numeric id, got {raw:?}"));
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(PageError::Validation(problems))
        }
    }

    /// The normalization pass: build the wire payload from the draft.
    ///
    /// Empty selections and blank text inputs become `None` (serialized as
    /// `null`); an empty string is never transmitted for a relational or
    /// optional column. Call only after [`validate`](Self::validate).
    ///
    /// # Errors
    ///
    /// Returns `PageError::Validation` if a select value is not numeric.
    pub fn normalize(&self) -> Result<Property, PageError> {
        let mut property = self.scratch.clone();

        property.descripcion = normalize_text(property.descripcion.take());
        property.piso = normalize_text(property.piso.take());
        property.direccion = normalize_text(property.direccion.take());
        property.codigo_postal = normalize_text(property.codigo_postal.take());
        property.registro_publico = normalize_text(property.registro_publico.take());
        property.convenio_url = normalize_text(property.convenio_url.take());
        property.fecha_validacion = normalize_text(property.fecha_validacion.take());

        property.tipo_negocio_id = parse_select(&self.selects.tipo_negocio_id)?.map(CatalogItemId::new);
        property.tipo_propiedad_id =
            parse_select(&self.selects.tipo_propiedad_id)?.map(CatalogItemId::new);
        property.estado_publicacion_id =
            parse_select(&self.selects.estado_publicacion_id)?.map(CatalogItemId::new);
        property.moneda_id = parse_select(&self.selects.moneda_id)?.map(CatalogItemId::new);
        property.frecuencia_alquiler_id =
            parse_select(&self.selects.frecuencia_alquiler_id)?.map(CatalogItemId::new);
        property.estado_fisico_id =
            parse_select(&self.selects.estado_fisico_id)?.map(CatalogItemId::new);
        property.estado_id = parse_select(&self.selects.estado_id)?.map(CatalogItemId::new);
        property.ciudad_id = parse_select(&self.selects.ciudad_id)?.map(CatalogItemId::new);
        property.zona_id = parse_select(&self.selects.zona_id)?.map(CatalogItemId::new);
        property.captado_por_agente_id =
            parse_select(&self.selects.captado_por_agente_id)?.map(AgentId::new);
        property.agente_id = parse_select(&self.selects.agente_id)?.map(AgentId::new);
        property.agente_externo_id =
            parse_select(&self.selects.agente_externo_id)?.map(CatalogItemId::new);
        property.validado_por_usuario_id =
            parse_select(&self.selects.validado_por_usuario_id)?.map(i64::from);

        Ok(property)
    }

    fn select_fields(&self) -> [(&'static str, &str); 13] {
        [
            ("tipo_negocio_id", self.selects.tipo_negocio_id.as_str()),
            ("tipo_propiedad_id", self.selects.tipo_propiedad_id.as_str()),
            ("estado_publicacion_id", self.selects.estado_publicacion_id.as_str()),
            ("moneda_id", self.selects.moneda_id.as_str()),
            ("frecuencia_alquiler_id", self.selects.frecuencia_alquiler_id.as_str()),
            ("estado_fisico_id", self.selects.estado_fisico_id.as_str()),
            ("estado_id", self.selects.estado_id.as_str()),
            ("ciudad_id", self.selects.ciudad_id.as_str()),
            ("zona_id", self.selects.zona_id.as_str()),
            ("captado_por_agente_id", self.selects.captado_por_agente_id.as_str()),
            ("agente_id", self.selects.agente_id.as_str()),
            ("agente_externo_id", self.selects.agente_externo_id.as_str()),
            ("validado_por_usuario_id", self.selects.validado_por_usuario_id.as_str()),
        ]
    }
}

/// Blank or whitespace-only text inputs become `None`.
fn normalize_text(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Empty selection becomes `None`; anything else must parse as an id.
fn parse_select(raw: &str) -> Result<Option<i32>, PageError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<i32>().map(Some).map_err(|_| {
        PageError::Validation(vec![format!("select value {raw:?} is not a numeric id")])
    })
}

/// Login form.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    /// Required email (valid format) and password (minimum length).
    ///
    /// # Errors
    ///
    /// Returns `PageError::Validation` listing every failed rule.
    pub fn validate(&self) -> Result<(), PageError> {
        let mut problems = Vec::new();
        validate_email(&self.email, &mut problems);
        validate_password(&self.password, &mut problems);
        if problems.is_empty() {
            Ok(())
        } else {
            Err(PageError::Validation(problems))
        }
    }
}

/// Registration form; password must be confirmed.
#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    /// Same rules as [`LoginForm`] plus confirm-password match.
    ///
    /// # Errors
    ///
    /// Returns `PageError::Validation` listing every failed rule.
    pub fn validate(&self) -> Result<(), PageError> {
        let mut problems = Vec::new();
        validate_email(&self.email, &mut problems);
        validate_password(&self.password, &mut problems);
        if self.password != self.confirm_password {
            problems.push("passwords do not match".to_string());
        }
        if problems.is_empty() {
            Ok(())
        } else {
            Err(PageError::Validation(problems))
        }
    }
}

/// New-account form on the user management page.
#[derive(Debug, Clone)]
pub struct NewUserForm {
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl Default for NewUserForm {
    fn default() -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            role: Role::User,
        }
    }
}

impl NewUserForm {
    /// Required email (valid format) and password (minimum length).
    ///
    /// # Errors
    ///
    /// Returns `PageError::Validation` listing every failed rule.
    pub fn validate(&self) -> Result<(), PageError> {
        let mut problems = Vec::new();
        validate_email(&self.email, &mut problems);
        validate_password(&self.password, &mut problems);
        if problems.is_empty() {
            Ok(())
        } else {
            Err(PageError::Validation(problems))
        }
    }
}

/// Add/edit form on the agent management page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentForm {
    pub nombre: String,
    pub email: String,
    pub telefono: String,
}

impl AgentForm {
    /// Required name and valid email; phone is optional.
    ///
    /// # Errors
    ///
    /// Returns `PageError::Validation` listing every failed rule.
    pub fn validate(&self) -> Result<(), PageError> {
        let mut problems = Vec::new();
        if self.nombre.trim().is_empty() {
            problems.push("nombre is required".to_string());
        }
        validate_email(&self.email, &mut problems);
        if problems.is_empty() {
            Ok(())
        } else {
            Err(PageError::Validation(problems))
        }
    }
}

fn validate_email(email: &str, problems: &mut Vec<String>) {
    if let Err(e) = Email::parse(email) {
        problems.push(format!("email: {e}"));
    }
}

fn validate_password(password: &str, problems: &mut Vec<String>) {
    if password.len() < MIN_PASSWORD_LENGTH {
        problems.push(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use casita_azul_core::PropertyId;

    #[test]
    fn test_empty_selects_normalize_to_null() {
        let draft = PropertyDraft {
            scratch: Property {
                titulo: "Casa Azul 1".to_string(),
                ..Property::default()
            },
            selects: FkSelections::default(),
        };

        let payload = draft.normalize().unwrap();
        let value = serde_json::to_value(&payload).unwrap();
        for field in [
            "tipo_negocio_id",
            "ciudad_id",
            "zona_id",
            "captado_por_agente_id",
            "validado_por_usuario_id",
        ] {
            let v = value.get(field).unwrap();
            assert!(v.is_null(), "{field} should be null, got {v}");
        }
    }

    #[test]
    fn test_selected_values_parse_to_ids() {
        let mut draft = PropertyDraft::empty();
        draft.scratch.titulo = "Casa Azul 1".to_string();
        draft.selects.ciudad_id = "3".to_string();
        draft.selects.captado_por_agente_id = "7".to_string();

        let payload = draft.normalize().unwrap();
        assert_eq!(payload.ciudad_id, Some(CatalogItemId::new(3)));
        assert_eq!(payload.captado_por_agente_id, Some(AgentId::new(7)));
        assert_eq!(payload.zona_id, None);
    }

    #[test]
    fn test_blank_text_fields_normalize_to_null() {
        let mut draft = PropertyDraft::empty();
        draft.scratch.titulo = "Casa Azul 1".to_string();
        draft.scratch.descripcion = Some("   ".to_string());
        draft.scratch.direccion = Some(String::new());
        draft.scratch.piso = Some("2".to_string());

        let payload = draft.normalize().unwrap();
        assert_eq!(payload.descripcion, None);
        assert_eq!(payload.direccion, None);
        assert_eq!(payload.piso, Some("2".to_string()));
    }

    #[test]
    fn test_roundtrip_preserves_existing_selection() {
        let property = Property {
            id: Some(PropertyId::new(1)),
            titulo: "Loft".to_string(),
            ciudad_id: Some(CatalogItemId::new(5)),
            ..Property::default()
        };
        let draft = PropertyDraft::from_property(&property);
        assert_eq!(draft.selects.ciudad_id, "5");
        let payload = draft.normalize().unwrap();
        assert_eq!(payload.ciudad_id, Some(CatalogItemId::new(5)));
    }

    #[test]
    fn test_validate_requires_title_and_numeric_selects() {
        let mut draft = PropertyDraft::empty();
        draft.selects.zona_id = "norte".to_string();

        let err = draft.validate().unwrap_err();
        let PageError::Validation(problems) = err else {
            panic!("expected validation error");
        };
        assert_eq!(problems.len(), 2);
        assert!(problems[0].contains("titulo"));
        assert!(problems[1].contains("zona_id"));
    }

    #[test]
    fn test_login_form_rules() {
        let form = LoginForm {
            email: "bad".to_string(),
            password: "123".to_string(),
        };
        assert!(form.validate().is_err());

        let form = LoginForm {
            email: "staff@casita-azul.com".to_string(),
            password: "secret-password".to_string(),
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_register_form_requires_matching_passwords() {
        let form = RegisterForm {
            email: "staff@casita-azul.com".to_string(),
            password: "secret-password".to_string(),
            confirm_password: "different".to_string(),
        };
        let err = form.validate().unwrap_err();
        assert!(err.to_string().contains("do not match"));
    }

    #[test]
    fn test_agent_form_phone_optional() {
        let form = AgentForm {
            nombre: "Laura Méndez".to_string(),
            email: "laura@casita-azul.com".to_string(),
            telefono: String::new(),
        };
        assert!(form.validate().is_ok());
    }
}
