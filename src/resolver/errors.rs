//! Module resolution error types and diagnostics.

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::core::module::ModuleStatus;
use crate::util::diagnostic::Diagnostic;

/// Error while validating a catalog or resolving a module selection.
///
/// All variants describe a broken catalog or selection. Resolution is
/// deterministic, so none of them is worth retrying.
#[derive(Debug, Clone, PartialEq, Eq, Error, MietteDiagnostic)]
pub enum ResolveError {
    #[error("unknown module `{module}`{}", required_by(.referenced_by))]
    #[diagnostic(
        code(qtforge::resolve::unknown_module),
        help("Check the module name against the catalog")
    )]
    UnknownModule {
        module: String,
        referenced_by: Option<String>,
    },

    #[error("module `{module}` is listed more than once")]
    #[diagnostic(code(qtforge::resolve::duplicate_module))]
    DuplicateModule { module: String },

    #[error("root module `{module}` has status `{status}`")]
    #[diagnostic(
        code(qtforge::resolve::inactive_root),
        help("The root module must be active")
    )]
    InactiveRoot { module: String, status: ModuleStatus },

    #[error("dependency cycle between modules: {}", .modules.join(", "))]
    #[diagnostic(
        code(qtforge::resolve::dependency_cycle),
        help("Remove one of the `depends` entries that form the cycle")
    )]
    DependencyCycle { modules: Vec<String> },
}

fn required_by(referenced_by: &Option<String>) -> String {
    match referenced_by {
        Some(by) => format!(" (required by `{}`)", by),
        None => String::new(),
    }
}

impl ResolveError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ResolveError::UnknownModule {
                module,
                referenced_by,
            } => {
                let mut diag = Diagnostic::error(format!("unknown module `{}`", module));

                if let Some(by) = referenced_by {
                    diag = diag.with_context(format!("`{}` depends on `{}`", by, module));
                    diag = diag.with_suggestion(format!(
                        "Add `{}` to the catalog or remove it from `{}`'s depends list",
                        module, by
                    ));
                } else {
                    diag = diag.with_suggestion(
                        "Run `qtforge modules` to list the modules of the catalog".to_string(),
                    );
                }

                diag
            }

            ResolveError::DuplicateModule { module } => {
                Diagnostic::error(format!("module `{}` is listed more than once", module))
                    .with_suggestion("Keep a single entry per module id".to_string())
            }

            ResolveError::InactiveRoot { module, status } => {
                Diagnostic::error(format!("root module `{}` cannot be built", module))
                    .with_context(format!("its status is `{}`", status))
                    .with_suggestion("Mark the root module as active".to_string())
            }

            ResolveError::DependencyCycle { modules } => {
                Diagnostic::error("dependency cycle in module catalog")
                    .with_context(format!("cycle: {}", modules.join(" <-> ")))
                    .with_suggestion(
                        "Break the cycle by removing one of the `depends` entries".to_string(),
                    )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_module_message() {
        let err = ResolveError::UnknownModule {
            module: "qtgui".to_string(),
            referenced_by: Some("qtsvg".to_string()),
        };

        assert_eq!(
            err.to_string(),
            "unknown module `qtgui` (required by `qtsvg`)"
        );

        let output = err.to_diagnostic().format(false);
        assert!(output.contains("`qtsvg` depends on `qtgui`"));
        assert!(output.contains("help: consider:"));
    }

    #[test]
    fn test_cycle_diagnostic() {
        let err = ResolveError::DependencyCycle {
            modules: vec!["qta".to_string(), "qtb".to_string()],
        };

        assert!(err.to_string().contains("qta, qtb"));
        let output = err.to_diagnostic().format(false);
        assert!(output.contains("cycle: qta <-> qtb"));
    }
}
