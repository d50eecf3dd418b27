// Cross-cutting prompt types and the template filler shared by every use case.
// Each use case defines its own prompt text in a prompts.rs alongside it.

/// A system instruction paired with a human instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatPrompt {
    pub system: String,
    pub human: String,
}

impl ChatPrompt {
    pub fn new(system: impl Into<String>, human: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            human: human.into(),
        }
    }

    /// Flattens the prompt for completion-style endpoints that take one string.
    pub fn to_text(&self) -> String {
        format!("System: {}\nHuman: {}", self.system, self.human)
    }
}

/// Substitutes `{name}` placeholders in a single pass over `template`.
///
/// Values are inserted verbatim and never rescanned, so a value containing
/// `{other_placeholder}` stays as-is. Unknown placeholders are left untouched.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len() + values.iter().map(|(_, v)| v.len()).sum::<usize>());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let replacement = after.find('}').and_then(|close| {
            let name = &after[..close];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value, close))
        });
        match replacement {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
