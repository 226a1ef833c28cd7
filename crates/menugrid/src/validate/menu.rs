//! Advisory menu validation.
//!
//! Returns human-readable warnings about suspicious input. It never fails:
//! the placement pipeline accepts any well-typed menu, warnings or not.

use uuid::Uuid;

use crate::models::menu::{NormalizedMenu, Section};

/// Collects warnings for the given menu. An empty vector means nothing
/// looked off.
pub fn validate(menu: &NormalizedMenu) -> Vec<String> {
    let mut warnings = Vec::new();

    if menu.sections.is_empty() {
        warnings.push("Menu must have at least one section".to_string());
    }
    if menu.id == Uuid::nil() {
        warnings.push("Menu id is the nil UUID".to_string());
    }
    if menu.name.trim().is_empty() {
        warnings.push("Menu name is empty".to_string());
    }
    if menu.metadata.currency.trim().is_empty() {
        warnings.push("Menu currency is empty".to_string());
    }

    let mut stack: Vec<&Section> = menu.sections.iter().collect();
    while let Some(section) = stack.pop() {
        check_section(section, &mut warnings);
        stack.extend(section.subsections.iter());
    }

    warnings
}

fn check_section(section: &Section, warnings: &mut Vec<String>) {
    let label = if section.name.trim().is_empty() {
        warnings.push(format!("Section {} has an empty name", section.id));
        section.id.to_string()
    } else {
        section.name.clone()
    };

    if section.items.is_empty() && section.subsections.is_empty() {
        warnings.push(format!(
            "Section '{label}' has no items and no subsections"
        ));
    }

    for item in &section.items {
        if item.name.trim().is_empty() {
            warnings.push(format!(
                "Item {} in section '{label}' has an empty name",
                item.id
            ));
        }
        if item.price_minor < 0 {
            warnings.push(format!(
                "Item '{}' in section '{label}' has a negative price",
                item.name
            ));
        }
        if let Some(level) = item.indicators.spice_level {
            if level > 3 {
                warnings.push(format!(
                    "Item '{}' has spice level {level}, expected 0 to 3",
                    item.name
                ));
            }
        }
    }
}
