use std::path::Path;

use dockgen_core::{Error, RenderContext, TokenizeError};
use minijinja::{AutoEscape, Environment, ErrorKind, UndefinedBehavior};

use crate::command::{CMD_LIST_FILTER, format_cmd_list};

/// Directory searched for templates when none is given.
pub const DEFAULT_TEMPLATE_DIR: &str = "templates";

/// Template rendered when none is named.
pub const DEFAULT_TEMPLATE: &str = "Dockerfile.j2";

/// Renders one named Jinja template against a [`RenderContext`].
///
/// Each engine owns its own environment: block tags are trimmed, output is
/// never escaped, undefined variables are errors, and `to_cmd_list` is
/// registered as a filter. The template is resolved and compiled at
/// construction, so a constructed engine only fails at render time on
/// render-time problems.
///
/// # Examples
///
/// ```
/// use dockgen_core::RenderContext;
/// use dockgen_render::TemplateEngine;
///
/// let engine = TemplateEngine::from_source(
///     "inline.j2",
///     "CMD [{{ startup_command | to_cmd_list }}]\n\n",
/// )
/// .unwrap();
///
/// let ctx = RenderContext::default().with_startup_command("rails server");
/// assert_eq!(engine.render(&ctx).unwrap(), "CMD [\"rails\", \"server\"]\n");
/// ```
#[derive(Debug)]
pub struct TemplateEngine {
    env: Environment<'static>,
    name: String,
}

impl TemplateEngine {
    /// Compile `template_name` from `template_dir`.
    ///
    /// # Errors
    ///
    /// - [`Error::TemplateNotFound`] if the template does not exist in `template_dir`
    /// - [`Error::TemplateSyntax`] if the template does not compile
    pub fn new(template_dir: impl AsRef<Path>, template_name: &str) -> dockgen_core::Result<Self> {
        let dir = template_dir.as_ref().to_path_buf();
        let mut env = environment();
        env.set_loader(minijinja::path_loader(&dir));

        let compiled = env.get_template(template_name).map(|_| ());
        match compiled {
            Ok(()) => {
                tracing::debug!(
                    dir = %dir.display(),
                    template = template_name,
                    "template compiled"
                );
                Ok(Self {
                    env,
                    name: template_name.to_owned(),
                })
            }
            Err(e) if e.kind() == ErrorKind::TemplateNotFound => Err(Error::TemplateNotFound {
                dir,
                name: template_name.to_owned(),
            }),
            Err(e) => Err(syntax_error(template_name, &e)),
        }
    }

    /// Compile a template held in memory.
    ///
    /// # Errors
    ///
    /// [`Error::TemplateSyntax`] if `source` does not compile.
    pub fn from_source(name: &str, source: &str) -> dockgen_core::Result<Self> {
        let mut env = environment();
        env.add_template_owned(name.to_owned(), source.to_owned())
            .map_err(|e| syntax_error(name, &e))?;

        Ok(Self {
            env,
            name: name.to_owned(),
        })
    }

    pub fn template_name(&self) -> &str {
        &self.name
    }

    /// Render the compiled template with `context`.
    ///
    /// Surrounding whitespace is stripped and exactly one trailing newline is
    /// appended.
    ///
    /// # Errors
    ///
    /// - [`Error::Tokenize`] if `to_cmd_list` is given a malformed command
    /// - [`Error::Render`] for any other render failure (e.g. an undefined variable)
    pub fn render(&self, context: &RenderContext) -> dockgen_core::Result<String> {
        let template = self
            .env
            .get_template(&self.name)
            .map_err(|e| self.render_error(e))?;

        let rendered = template
            .render(context)
            .map_err(|e| self.render_error(e))?;

        Ok(normalize(&rendered))
    }

    fn render_error(&self, err: minijinja::Error) -> Error {
        if let Some(tokenize) = find_tokenize_error(&err) {
            return Error::Tokenize(tokenize.clone());
        }
        Error::Render {
            name: self.name.clone(),
            detail: err.to_string(),
        }
    }
}

/// Environment shared by every engine, before a template source is attached.
fn environment() -> Environment<'static> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env.add_filter(CMD_LIST_FILTER, to_cmd_list);
    env
}

fn to_cmd_list(command: &str) -> Result<String, minijinja::Error> {
    format_cmd_list(command).map_err(|e| {
        minijinja::Error::new(ErrorKind::InvalidOperation, e.to_string()).with_source(e)
    })
}

fn find_tokenize_error(err: &minijinja::Error) -> Option<&TokenizeError> {
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        if let Some(tokenize) = cause.downcast_ref::<TokenizeError>() {
            return Some(tokenize);
        }
        source = cause.source();
    }
    None
}

fn syntax_error(name: &str, err: &minijinja::Error) -> Error {
    Error::TemplateSyntax {
        name: name.to_owned(),
        detail: err.to_string(),
    }
}

fn normalize(rendered: &str) -> String {
    let mut out = rendered.trim().to_owned();
    out.push('\n');
    out
}
