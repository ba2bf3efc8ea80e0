//! File templates
//!
//! Templates are plain strings with `{{key}}` placeholders, filled by [`render`].

mod backup;
mod database;
mod sequelize;

pub use backup::BACKUP_SCRIPT;
pub use database::{database_files, DatabaseTemplateVars};
pub use sequelize::{
    migration_file, model_file, seeder_file, sequelize_config, sequelizerc, SEQUELIZERC_FILE,
};

/// Substitute every `{{key}}` occurrence in one pass over the template.
///
/// Unknown placeholders are left as is, and substituted values are never
/// scanned again.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };

        let key = &after[..end];
        match vars.iter().find(|(name, _)| *name == key) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[start..start + 2 + end + 2]),
        }
        rest = &after[end + 2..];
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_replaces_all_occurrences() {
        let out = render("{{a}}-{{b}}-{{a}}", &[("a", "x"), ("b", "y")]);
        assert_eq!(out, "x-y-x");
    }

    #[test]
    fn render_does_not_expand_placeholders_inside_values() {
        let out = render("{{a}}/{{b}}", &[("a", "{{b}}"), ("b", "y")]);
        assert_eq!(out, "{{b}}/y");
    }

    #[test]
    fn render_keeps_unclosed_braces() {
        assert_eq!(render("x {{a", &[("a", "y")]), "x {{a");
    }

    #[test]
    fn render_keeps_unknown_placeholders() {
        assert_eq!(render("{{missing}}", &[("a", "x")]), "{{missing}}");
    }
}
