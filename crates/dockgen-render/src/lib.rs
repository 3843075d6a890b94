//! Dockerfile rendering for dockgen.
//!
//! # Pipeline
//!
//! ```text
//! dockgen
//!   1. Load      ── ConfigStore::open(project.yaml)
//!   2. Context   ── RenderContext::from_config()
//!   3. Compile   ── TemplateEngine::new(templates/, Dockerfile.j2)
//!   4. Render    ── TemplateEngine::render()  (to_cmd_list → command::format_cmd_list)
//!   5. Write     ── output::write_atomic(Dockerfile)
//! ```
//!
//! # Templates
//!
//! Templates use Jinja syntax. The variables `name`, `startup_command` and
//! `maintainer` are always defined; any other variable is a render error.
//! The `to_cmd_list` filter turns a shell-style command into the inside of an
//! exec-form array:
//!
//! ```text
//! CMD [{{ startup_command | to_cmd_list }}]   →   CMD ["rails", "server"]
//! ```

pub mod command;
pub mod engine;
pub mod output;

pub use engine::{DEFAULT_TEMPLATE, DEFAULT_TEMPLATE_DIR, TemplateEngine};
pub use output::{DEFAULT_OUTPUT, write_atomic};
