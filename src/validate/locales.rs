/// Identifies one message template in a locale table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKey {
    Invalid,
    Empty,
    Email,
    Min,
    Max,
    Select,
    Match,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    En,
    Fr,
}

impl Locale {
    /// Parses a two-letter tag. An unknown tag falls back to English
    /// with a logged warning.
    pub fn parse(tag: &str) -> Self {
        match tag.to_ascii_lowercase().as_str() {
            "en" => Self::En,
            "fr" => Self::Fr,
            other => {
                log::warn!("unknown locale '{other}', falling back to 'en'");
                Self::En
            }
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Fr => "fr",
        }
    }

    /// Resolves a template, substituting `{name}` placeholders from
    /// `params`.
    pub fn message(self, key: MessageKey, params: &[(&str, &str)]) -> String {
        let mut message = self.template(key).to_string();
        for (name, value) in params {
            message = message.replace(&format!("{{{name}}}"), value);
        }
        message
    }

    fn template(self, key: MessageKey) -> &'static str {
        match self {
            Self::Fr => match key {
                MessageKey::Invalid => "Entrée invalide",
                MessageKey::Empty => "Ce champ ne peut pas être vide",
                MessageKey::Email => "Le champ email n'est pas un email valide",
                MessageKey::Min => "Le champ doit contenir au minimum {min} caractères",
                MessageKey::Max => "Le champ ne peut pas contenir plus de {max} caractères",
                MessageKey::Select => "Veuillez sélectionner un {name}",
                MessageKey::Match => "La valeur indiquée n'est pas valide",
            },
            Self::En => match key {
                MessageKey::Invalid => "Field invalid",
                MessageKey::Empty => "This field cannot be empty, please enter a message",
                MessageKey::Email => "The email is not valid",
                MessageKey::Min => "This field must contain at least {min} characters",
                MessageKey::Max => "The field cannot contain more than {max} characters",
                MessageKey::Select => "Please select a valid {name}",
                MessageKey::Match => "The value is not valid",
            },
        }
    }
}
