//! Template renderer.

use super::TemplateError;
use handlebars::{no_escape, Handlebars};
use serde_json::json;

/// Registry name of the mirror workflow template.
const MIRROR_WORKFLOW: &str = "mirror-workflow";

/// GitHub Actions workflow that mirrors `new_branch` onto `old_branch`.
const MIRROR_WORKFLOW_TEMPLATE: &str = r#"name: Mirror {{new_branch}} to {{old_branch}}

on:
  push:
    branches: [ {{new_branch}} ]

jobs:
  mirror-to-{{old_branch}}:
    runs-on: ubuntu-latest
    steps:
    - uses: zofrex/mirror-branch@v1
      with:
        target-branch: {{old_branch}}
"#;

/// Creates a configured Handlebars registry.
///
/// The registry is configured with:
/// - No HTML escaping (workflow files are YAML, not HTML)
/// - Strict mode (catches missing variables)
/// - The mirror workflow template pre-registered
///
/// # Errors
///
/// Returns an error if a built-in template fails to compile.
pub fn create_handlebars_registry() -> Result<Handlebars<'static>, TemplateError> {
    let mut hbs = Handlebars::new();
    hbs.register_escape_fn(no_escape);
    hbs.set_strict_mode(true);
    hbs.register_template_string(MIRROR_WORKFLOW, MIRROR_WORKFLOW_TEMPLATE)?;
    Ok(hbs)
}

/// Renders the generated files committed during a migration.
pub struct TemplateRenderer {
    handlebars: Handlebars<'static>,
}

impl TemplateRenderer {
    /// Creates a new template renderer.
    ///
    /// # Errors
    ///
    /// Returns an error if a built-in template fails to compile.
    pub fn new() -> Result<Self, TemplateError> {
        Ok(Self {
            handlebars: create_handlebars_registry()?,
        })
    }

    /// Renders the mirror workflow for a branch pair.
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn render_mirror_workflow(
        &self,
        old_branch: &str,
        new_branch: &str,
    ) -> Result<String, TemplateError> {
        let data = json!({
            "old_branch": old_branch,
            "new_branch": new_branch,
        });
        Ok(self.handlebars.render(MIRROR_WORKFLOW, &data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_mirror_workflow() {
        let renderer = TemplateRenderer::new().unwrap();

        let workflow = renderer.render_mirror_workflow("rolling", "jazzy").unwrap();

        assert_eq!(
            workflow,
            "name: Mirror jazzy to rolling\n\
             \n\
             on:\n  push:\n    branches: [ jazzy ]\n\
             \n\
             jobs:\n  mirror-to-rolling:\n    runs-on: ubuntu-latest\n    steps:\n    \
             - uses: zofrex/mirror-branch@v1\n      with:\n        target-branch: rolling\n"
        );
    }

    #[test]
    fn no_html_escaping() {
        let renderer = TemplateRenderer::new().unwrap();

        let workflow = renderer
            .render_mirror_workflow("feature/<old>", "a&b")
            .unwrap();

        assert!(workflow.contains("target-branch: feature/<old>"));
        assert!(workflow.contains("branches: [ a&b ]"));
    }
}
