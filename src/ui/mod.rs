//! Terminal output for azfn commands
//!
//! Interactive terminals get `cliclack` prompts and spinners plus an
//! `indicatif` bar for tree loading; CI and piped output fall back to plain
//! tagged lines.
//!
//! ```rust,ignore
//! use azfn::ui::{self, TaskSpinner, UiContext};
//!
//! let ctx = UiContext::detect().with_auto_yes(args.yes);
//! let mut spinner = TaskSpinner::new(&ctx);
//! spinner.start("Looking up my-app...");
//! spinner.stop("Found my-app");
//! ui::key_value(&ctx, "State", "Running");
//! ```

mod context;
mod output;
mod progress;
mod prompts;
mod theme;

pub use context::UiContext;
pub use output::{
    intro, key_value, key_value_status, outro_success, outro_warn, remark, section, step_ok,
    step_ok_detail, step_warn_hint,
};
pub use progress::{TaskSpinner, TreeProgress};
pub use prompts::confirm;
pub use theme::{init_theme, AzfnTheme};
