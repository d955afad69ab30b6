//! Prebuilt ad templates.
//!
//! Each template bundles the creative assets for one line of business:
//! responsive search ad headlines and descriptions plus the keyword set
//! attached to the ad group. The catalog is built once at startup and
//! never mutated.

use serde::Serialize;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Platform limits for responsive search ads
// ---------------------------------------------------------------------------

/// Minimum number of headline assets per ad.
pub const MIN_HEADLINES: usize = 3;
/// Maximum number of headline assets per ad.
pub const MAX_HEADLINES: usize = 15;
/// Maximum characters in one headline.
pub const MAX_HEADLINE_CHARS: usize = 30;
/// Minimum number of description assets per ad.
pub const MIN_DESCRIPTIONS: usize = 2;
/// Maximum number of description assets per ad.
pub const MAX_DESCRIPTIONS: usize = 4;
/// Maximum characters in one description.
pub const MAX_DESCRIPTION_CHARS: usize = 90;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Creative bundle for one template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateBundle {
    pub name: String,
    pub headlines: Vec<String>,
    pub descriptions: Vec<String>,
    pub keywords: Vec<String>,
}

impl TemplateBundle {
    fn from_static(
        name: &str,
        headlines: &[&str],
        descriptions: &[&str],
        keywords: &[&str],
    ) -> Self {
        let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();
        Self {
            name: name.to_string(),
            headlines: owned(headlines),
            descriptions: owned(descriptions),
            keywords: owned(keywords),
        }
    }

    /// Check asset counts and lengths against the platform limits.
    ///
    /// Lengths are counted in characters, not bytes.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_assets(
            &self.name,
            "headline",
            &self.headlines,
            MIN_HEADLINES,
            MAX_HEADLINES,
            MAX_HEADLINE_CHARS,
        )?;
        validate_assets(
            &self.name,
            "description",
            &self.descriptions,
            MIN_DESCRIPTIONS,
            MAX_DESCRIPTIONS,
            MAX_DESCRIPTION_CHARS,
        )?;
        if self.keywords.is_empty() {
            return Err(CoreError::Validation(format!(
                "Template '{}' must carry at least one keyword",
                self.name
            )));
        }
        if let Some(blank) = self.keywords.iter().position(|k| k.trim().is_empty()) {
            return Err(CoreError::Validation(format!(
                "Template '{}' keyword #{} is blank",
                self.name,
                blank + 1
            )));
        }
        Ok(())
    }
}

fn validate_assets(
    template: &str,
    kind: &str,
    assets: &[String],
    min: usize,
    max: usize,
    max_chars: usize,
) -> Result<(), CoreError> {
    if assets.len() < min || assets.len() > max {
        return Err(CoreError::Validation(format!(
            "Template '{template}' has {} {kind}s; expected between {min} and {max}",
            assets.len()
        )));
    }
    for asset in assets {
        let chars = asset.chars().count();
        if chars == 0 || chars > max_chars {
            return Err(CoreError::Validation(format!(
                "Template '{template}' {kind} '{asset}' is {chars} characters; \
                 expected 1 to {max_chars}"
            )));
        }
    }
    Ok(())
}

/// Ordered, immutable set of templates offered to the operator.
#[derive(Debug, Clone)]
pub struct TemplateCatalog {
    bundles: Vec<TemplateBundle>,
}

impl TemplateCatalog {
    /// Build a catalog from explicit bundles (first occurrence of a name wins).
    pub fn new(bundles: Vec<TemplateBundle>) -> Self {
        let mut unique: Vec<TemplateBundle> = Vec::with_capacity(bundles.len());
        for bundle in bundles {
            if !unique.iter().any(|b| b.name == bundle.name) {
                unique.push(bundle);
            }
        }
        Self { bundles: unique }
    }

    /// The templates shipped with the launcher.
    pub fn builtin() -> Self {
        Self::new(vec![
            TemplateBundle::from_static(
                "Dentista",
                &[
                    "Dentista Perto de Você",
                    "Agende Sua Avaliação",
                    "Clareamento Dental",
                    "Implantes e Próteses",
                    "Atendimento de Urgência",
                ],
                &[
                    "Cuidamos do seu sorriso com tecnologia moderna e atendimento humanizado.",
                    "Agende hoje sua consulta. Parcelamos tratamentos em até 12x.",
                ],
                &[
                    "dentista",
                    "clínica odontológica",
                    "clareamento dental",
                    "implante dentário",
                    "dentista de urgência",
                ],
            ),
            TemplateBundle::from_static(
                "Advocacia",
                &[
                    "Advogado Especialista",
                    "Consulta Jurídica Rápida",
                    "Direito Trabalhista",
                    "Direito de Família",
                ],
                &[
                    "Orientação jurídica clara e objetiva. Fale com um advogado ainda hoje.",
                    "Causas trabalhistas, cíveis e de família com atendimento sigiloso.",
                ],
                &[
                    "advogado",
                    "advogado trabalhista",
                    "advogado de família",
                    "consulta jurídica",
                ],
            ),
            TemplateBundle::from_static(
                "Oficina Mecânica",
                &[
                    "Oficina Mecânica de Confiança",
                    "Revisão Completa",
                    "Troca de Óleo Rápida",
                    "Orçamento Sem Compromisso",
                ],
                &[
                    "Revisão, freios, suspensão e injeção eletrônica com garantia de serviço.",
                    "Mecânicos experientes e peças de qualidade. Peça seu orçamento agora.",
                    "Atendemos carros nacionais e importados. Retirada e entrega no bairro.",
                ],
                &[
                    "oficina mecânica",
                    "mecânico perto de mim",
                    "troca de óleo",
                    "revisão de carro",
                    "alinhamento e balanceamento",
                ],
            ),
        ])
    }

    /// Check every bundle against the platform limits; the first
    /// failure names its template.
    pub fn validate_all(&self) -> Result<(), CoreError> {
        self.bundles.iter().try_for_each(TemplateBundle::validate)
    }

    /// Template names in catalog order.
    pub fn list_template_names(&self) -> Vec<&str> {
        self.bundles.iter().map(|b| b.name.as_str()).collect()
    }

    /// Look up a template by exact name.
    ///
    /// Never substitutes a default: an unknown name is an error even
    /// though the form only offers names from [`list_template_names`](Self::list_template_names).
    pub fn resolve_template(&self, name: &str) -> Result<&TemplateBundle, CoreError> {
        self.bundles
            .iter()
            .find(|b| b.name == name)
            .ok_or_else(|| CoreError::UnknownTemplate(name.to_string()))
    }
}
