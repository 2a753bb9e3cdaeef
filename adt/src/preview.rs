use std::fmt;

use pseudo::render::{TextOptions, render_text};

use crate::model::{Adt, Variant};

const BODY_INDENT: &str = "  ";

/// A read-only text view of a document with one implementation variant
/// selected.
pub struct Preview<'a> {
    pub adt: &'a Adt,
    pub variant: Variant,
    pub options: &'a TextOptions,
}

/// Render the preview of `adt` for `variant`. Method bodies go through the
/// pseudocode renderer with `options`.
pub fn render(adt: &Adt, variant: Variant, options: &TextOptions) -> String {
    Preview {
        adt,
        variant,
        options,
    }
    .to_string()
}

fn write_indented(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    for line in text.lines() {
        if line.is_empty() {
            writeln!(f)?;
        } else {
            writeln!(f, "{}{}", BODY_INDENT, line)?;
        }
    }
    Ok(())
}

fn or_placeholder<'s>(value: &'s str, placeholder: &'s str) -> &'s str {
    if value.is_empty() { placeholder } else { value }
}

impl Preview<'_> {
    fn write_profiles(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Profiles")?;
        if self.adt.profiles.is_empty() {
            return writeln!(f, "{}No profiles defined.", BODY_INDENT);
        }
        for profile in &self.adt.profiles {
            writeln!(f, "{}{}", BODY_INDENT, profile.signature)?;
            if let Some(description) = profile.description.as_deref().filter(|d| !d.is_empty()) {
                writeln!(f, "{0}{0}{1}", BODY_INDENT, description)?;
            }
            if !profile.preconditions.is_empty() {
                writeln!(f, "{0}{0}Pre: {1}", BODY_INDENT, profile.preconditions.join(", "))?;
            }
        }
        Ok(())
    }

    fn write_axioms(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Axioms")?;
        if self.adt.axioms.is_empty() {
            return writeln!(f, "{}No axioms defined.", BODY_INDENT);
        }
        for axiom in &self.adt.axioms {
            // Links to deleted profiles are skipped.
            let names: Vec<&str> = axiom
                .related_profile_ids
                .iter()
                .filter_map(|id| self.adt.profile(id))
                .map(|p| p.name.as_str())
                .collect();
            if names.is_empty() {
                writeln!(f, "{}{}", BODY_INDENT, axiom.expression)?;
            } else {
                writeln!(f, "{}{}  [{}]", BODY_INDENT, axiom.expression, names.join(", "))?;
            }
        }
        Ok(())
    }

    fn write_implementation(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let implementation = self.adt.implementation(self.variant);
        writeln!(f, "Implementation ({})", self.variant.label())?;
        writeln!(f)?;

        writeln!(f, "Domain Value Space")?;
        write_indented(
            f,
            or_placeholder(&implementation.domain_space, "// No domain space defined"),
        )?;
        writeln!(f)?;

        writeln!(f, "Methods")?;
        for profile in &self.adt.profiles {
            writeln!(f, "{}{}", BODY_INDENT, profile.name)?;
            match implementation.method(&profile.id) {
                // Only an absent or empty body counts as missing.
                Some(code) if !code.is_empty() => {
                    let forest = pseudo::parse(code);
                    let rendered = render_text(&forest.nodes, self.options);
                    for line in rendered.lines() {
                        writeln!(f, "{0}{0}{1}", BODY_INDENT, line)?;
                    }
                }
                _ => writeln!(
                    f,
                    "{0}{0}// Implementation for {1} missing",
                    BODY_INDENT, profile.name
                )?,
            }
        }
        Ok(())
    }
}

impl fmt::Display for Preview<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", or_placeholder(&self.adt.name, "ADT Name"))?;
        writeln!(
            f,
            "{}",
            or_placeholder(&self.adt.domain, "Domain description goes here...")
        )?;
        if !self.adt.uses.is_empty() {
            writeln!(f, "Uses: {}", self.adt.uses)?;
        }
        writeln!(f)?;

        self.write_profiles(f)?;
        writeln!(f)?;
        self.write_axioms(f)?;
        writeln!(f)?;
        self.write_implementation(f)
    }
}
