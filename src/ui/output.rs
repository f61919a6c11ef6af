//! Formatted output with plain fallbacks for non-interactive runs
//!
//! Fancy output goes through cliclack; plain output prints a bracketed tag
//! so logs from CI stay greppable.

use super::context::UiContext;
use console::{style, StyledObject};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Ok,
    Warn,
}

impl Tone {
    fn from_ok(ok: bool) -> Self {
        if ok {
            Tone::Ok
        } else {
            Tone::Warn
        }
    }

    fn tag(self) -> StyledObject<&'static str> {
        match self {
            Tone::Ok => style("[OK]").green(),
            Tone::Warn => style("[WARN]").yellow(),
        }
    }

    fn paint<D>(self, value: D) -> StyledObject<D> {
        match self {
            Tone::Ok => style(value).green(),
            Tone::Warn => style(value).yellow(),
        }
    }
}

pub fn intro(ctx: &UiContext, title: &str) {
    let title = style(title).blue().bold();
    if ctx.use_fancy_output() {
        cliclack::intro(title).ok();
    } else {
        println!("{}", title);
    }
}

fn outro(ctx: &UiContext, tone: Tone, message: &str) {
    if ctx.use_fancy_output() {
        cliclack::outro(tone.paint(message).bold()).ok();
    } else {
        println!("{} {}", tone.tag(), message);
    }
}

pub fn outro_success(ctx: &UiContext, message: &str) {
    outro(ctx, Tone::Ok, message);
}

pub fn outro_warn(ctx: &UiContext, message: &str) {
    outro(ctx, Tone::Warn, message);
}

/// Header above a block of key/value lines
pub fn section(ctx: &UiContext, title: &str) {
    println!();
    if ctx.use_fancy_output() {
        cliclack::log::info(style(title).bold()).ok();
    } else {
        println!("{}", style(title).bold());
    }
}

fn step(ctx: &UiContext, tone: Tone, line: String) {
    if !ctx.use_fancy_output() {
        println!("  {} {}", tone.tag(), line);
        return;
    }
    match tone {
        Tone::Ok => cliclack::log::success(line).ok(),
        Tone::Warn => cliclack::log::warning(line).ok(),
    };
}

pub fn step_ok(ctx: &UiContext, message: &str) {
    step(ctx, Tone::Ok, message.to_string());
}

pub fn step_ok_detail(ctx: &UiContext, message: &str, detail: &str) {
    step(ctx, Tone::Ok, format!("{} ({})", message, style(detail).dim()));
}

pub fn step_warn_hint(ctx: &UiContext, message: &str, hint: &str) {
    step(ctx, Tone::Warn, format!("{} - {}", message, style(hint).dim()));
}

pub fn remark(ctx: &UiContext, message: &str) {
    if ctx.use_fancy_output() {
        cliclack::log::remark(message).ok();
    } else {
        println!("  {}", style(message).dim());
    }
}

pub fn key_value(ctx: &UiContext, key: &str, value: &str) {
    println!("  {}: {}", key_label(ctx, key), value);
}

/// Key/value line colored green when `ok`, yellow otherwise
pub fn key_value_status(ctx: &UiContext, key: &str, value: &str, ok: bool) {
    let tone = Tone::from_ok(ok);
    if ctx.use_fancy_output() {
        println!("  {}: {}", key_label(ctx, key), tone.paint(value));
    } else {
        println!("  {} {}: {}", tone.tag(), key, value);
    }
}

fn key_label<'a>(ctx: &UiContext, key: &'a str) -> StyledObject<&'a str> {
    if ctx.use_fancy_output() {
        style(key).dim()
    } else {
        style(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_output_does_not_panic() {
        let ctx = UiContext::non_interactive();
        intro(&ctx, "azfn");
        section(&ctx, "my-app");
        key_value(&ctx, "Runtime", "~4");
        key_value_status(&ctx, "State", "Stopped", false);
        step_warn_hint(&ctx, "No virtual environment found", "python -m venv .venv");
        outro_success(&ctx, "Done");
    }

    #[test]
    fn tone_follows_status() {
        assert_eq!(Tone::from_ok(true), Tone::Ok);
        assert_eq!(Tone::from_ok(false), Tone::Warn);
    }
}
