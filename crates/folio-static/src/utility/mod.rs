//! On-demand utility CSS.
//!
//! Class tokens are scanned out of rendered pages and source files. Every
//! token the engine recognizes becomes one rule (or a few, for plugin
//! utilities), and unknown tokens are dropped silently. Output is stable for a
//! given token set: the preflight layer comes first, then plain rules in class
//! order, then one media block per breakpoint in ascending width.

mod palette;
mod plugins;

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;

use crate::config::StylePlugin;

pub use palette::{color, hex_to_rgb};

/// Declarations for one selector, with an optional selector suffix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleBody {
    /// Appended to the class selector, e.g. `" > *"`.
    pub suffix: String,
    pub declarations: Vec<(String, String)>,
}

impl RuleBody {
    pub fn new(declarations: &[(&str, &str)]) -> Self {
        Self::with_suffix("", declarations)
    }

    pub fn with_suffix(suffix: &str, declarations: &[(&str, &str)]) -> Self {
        Self {
            suffix: suffix.to_string(),
            declarations: declarations
                .iter()
                .map(|(p, v)| (p.to_string(), v.to_string()))
                .collect(),
        }
    }

    pub fn push(&mut self, property: &str, value: impl Into<String>) {
        self.declarations.push((property.to_string(), value.into()));
    }
}

/// Stylesheet produced for a token set.
#[derive(Debug, Clone)]
pub struct GeneratedCss {
    pub css: String,
    /// Recognized classes, in emission order.
    pub classes: Vec<String>,
}

/// Responsive breakpoints, ordered by min width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Breakpoint {
    Sm,
    Md,
    Lg,
    Xl,
}

impl Breakpoint {
    fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "sm" => Some(Self::Sm),
            "md" => Some(Self::Md),
            "lg" => Some(Self::Lg),
            "xl" => Some(Self::Xl),
            _ => None,
        }
    }

    pub const fn min_width(self) -> u16 {
        match self {
            Self::Sm => 640,
            Self::Md => 768,
            Self::Lg => 1024,
            Self::Xl => 1280,
        }
    }
}

/// Variant prefixes split off a class token.
#[derive(Debug, Default, PartialEq, Eq)]
struct Variants<'a> {
    screen: Option<Breakpoint>,
    state: Option<&'static str>,
    utility: &'a str,
}

fn split_variants(class: &str) -> Option<Variants<'_>> {
    let mut variants = Variants {
        utility: class,
        ..Default::default()
    };

    let mut parts: Vec<&str> = class.split(':').collect();
    variants.utility = parts.pop()?;

    for prefix in parts {
        if let Some(bp) = Breakpoint::from_prefix(prefix) {
            if variants.screen.replace(bp).is_some() {
                return None;
            }
            continue;
        }
        let state = match prefix {
            "hover" => ":hover",
            "focus" => ":focus",
            _ => return None,
        };
        if variants.state.replace(state).is_some() {
            return None;
        }
    }

    Some(variants)
}

/// Generates CSS for the utility classes in use.
#[derive(Debug, Clone, Default)]
pub struct UtilityEngine {
    aspect_ratio: bool,
    typography: bool,
}

impl UtilityEngine {
    pub fn new(plugins: &[StylePlugin]) -> Self {
        Self {
            aspect_ratio: plugins.contains(&StylePlugin::AspectRatio),
            typography: plugins.contains(&StylePlugin::Typography),
        }
    }

    /// Add every candidate class token in `text` to `out`.
    pub fn scan(text: &str, out: &mut BTreeSet<String>) {
        let tokens = text.split(|c: char| {
            c.is_whitespace()
                || matches!(
                    c,
                    '"' | '\'' | '`' | '<' | '>' | '=' | '{' | '}' | '(' | ')' | ','
                )
        });

        for token in tokens {
            let plausible = !token.is_empty()
                && token.len() <= 64
                && token
                    .chars()
                    .next()
                    .is_some_and(|c| c.is_ascii_lowercase() || c == '-')
                && token.chars().all(|c| {
                    c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | ':' | '/' | '.')
                });
            if plausible && !token.ends_with(['.', ':']) {
                out.insert(token.to_string());
            }
        }
    }

    /// Rule bodies for a utility without variants, if it is recognized.
    pub fn resolve(&self, utility: &str) -> Option<Vec<RuleBody>> {
        if let Some(declarations) = static_utility(utility) {
            return Some(vec![RuleBody::new(declarations)]);
        }
        if self.aspect_ratio {
            if let Some(bodies) = plugins::aspect_ratio(utility) {
                return Some(bodies);
            }
        }
        if self.typography {
            if let Some(bodies) = plugins::typography(utility) {
                return Some(bodies);
            }
        }
        dynamic_utility(utility).map(|body| vec![body])
    }

    /// Build the stylesheet for a set of class tokens.
    pub fn generate(&self, classes: &BTreeSet<String>) -> GeneratedCss {
        let mut css = String::from(PREFLIGHT);
        let mut base = String::new();
        let mut screens: BTreeMap<Breakpoint, String> = BTreeMap::new();
        let mut recognized = Vec::new();

        for class in classes {
            let Some(variants) = split_variants(class) else {
                continue;
            };
            let Some(bodies) = self.resolve(variants.utility) else {
                continue;
            };

            let target = match variants.screen {
                Some(bp) => screens.entry(bp).or_default(),
                None => &mut base,
            };
            let indent = if variants.screen.is_some() { "  " } else { "" };
            let selector = format!(
                ".{}{}",
                escape_selector(class),
                variants.state.unwrap_or_default()
            );

            for body in &bodies {
                write_rule(target, indent, &format!("{selector}{}", body.suffix), body);
            }
            recognized.push(class.clone());
        }

        css.push_str(&base);
        for (bp, rules) in screens {
            let _ = writeln!(css, "@media (min-width: {}px) {{", bp.min_width());
            css.push_str(&rules);
            css.push_str("}\n");
        }

        GeneratedCss {
            css,
            classes: recognized,
        }
    }
}

fn write_rule(out: &mut String, indent: &str, selector: &str, body: &RuleBody) {
    let _ = writeln!(out, "{indent}{selector} {{");
    for (property, value) in &body.declarations {
        let _ = writeln!(out, "{indent}  {property}: {value};");
    }
    let _ = writeln!(out, "{indent}}}");
}

/// Backslash-escape everything outside `[A-Za-z0-9_-]`.
pub fn escape_selector(class: &str) -> String {
    let mut out = String::with_capacity(class.len() + 4);
    for c in class.chars() {
        if !(c.is_ascii_alphanumeric() || c == '_' || c == '-') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

const PREFLIGHT: &str = "*, ::before, ::after {
  box-sizing: border-box;
  border-width: 0;
  border-style: solid;
  border-color: #e5e7eb;
}
html {
  line-height: 1.5;
  -webkit-text-size-adjust: 100%;
  tab-size: 4;
  font-family: ui-sans-serif, system-ui, -apple-system, \"Segoe UI\", Roboto, sans-serif;
}
body {
  margin: 0;
  line-height: inherit;
}
h1, h2, h3, h4, h5, h6 {
  font-size: inherit;
  font-weight: inherit;
}
blockquote, dl, dd, h1, h2, h3, h4, h5, h6, hr, figure, p, pre {
  margin: 0;
}
a {
  color: inherit;
  text-decoration: inherit;
}
ol, ul {
  list-style: none;
  margin: 0;
  padding: 0;
}
img, svg, video {
  display: block;
  vertical-align: middle;
}
img, video {
  max-width: 100%;
  height: auto;
}
code, pre {
  font-family: ui-monospace, SFMono-Regular, Menlo, Consolas, monospace;
}
";

fn static_utility(utility: &str) -> Option<&'static [(&'static str, &'static str)]> {
    let declarations: &'static [(&str, &str)] = match utility {
        "block" => &[("display", "block")],
        "inline-block" => &[("display", "inline-block")],
        "inline" => &[("display", "inline")],
        "flex" => &[("display", "flex")],
        "inline-flex" => &[("display", "inline-flex")],
        "grid" => &[("display", "grid")],
        "hidden" => &[("display", "none")],

        "flex-row" => &[("flex-direction", "row")],
        "flex-col" => &[("flex-direction", "column")],
        "flex-wrap" => &[("flex-wrap", "wrap")],
        "flex-1" => &[("flex", "1 1 0%")],
        "grow" => &[("flex-grow", "1")],
        "shrink-0" => &[("flex-shrink", "0")],
        "items-start" => &[("align-items", "flex-start")],
        "items-center" => &[("align-items", "center")],
        "items-end" => &[("align-items", "flex-end")],
        "items-baseline" => &[("align-items", "baseline")],
        "justify-start" => &[("justify-content", "flex-start")],
        "justify-center" => &[("justify-content", "center")],
        "justify-end" => &[("justify-content", "flex-end")],
        "justify-between" => &[("justify-content", "space-between")],

        "static" => &[("position", "static")],
        "relative" => &[("position", "relative")],
        "absolute" => &[("position", "absolute")],
        "fixed" => &[("position", "fixed")],
        "sticky" => &[("position", "sticky")],
        "inset-0" => &[("inset", "0px")],
        "top-0" => &[("top", "0px")],
        "overflow-hidden" => &[("overflow", "hidden")],
        "overflow-auto" => &[("overflow", "auto")],
        "overflow-x-auto" => &[("overflow-x", "auto")],

        "text-left" => &[("text-align", "left")],
        "text-center" => &[("text-align", "center")],
        "text-right" => &[("text-align", "right")],
        "italic" => &[("font-style", "italic")],
        "underline" => &[("text-decoration-line", "underline")],
        "no-underline" => &[("text-decoration-line", "none")],
        "uppercase" => &[("text-transform", "uppercase")],
        "whitespace-nowrap" => &[("white-space", "nowrap")],
        "antialiased" => &[
            ("-webkit-font-smoothing", "antialiased"),
            ("-moz-osx-font-smoothing", "grayscale"),
        ],
        "tracking-tight" => &[("letter-spacing", "-0.025em")],
        "tracking-wide" => &[("letter-spacing", "0.025em")],
        "leading-none" => &[("line-height", "1")],
        "leading-tight" => &[("line-height", "1.25")],
        "leading-snug" => &[("line-height", "1.375")],
        "leading-normal" => &[("line-height", "1.5")],
        "leading-relaxed" => &[("line-height", "1.625")],
        "leading-loose" => &[("line-height", "2")],

        "font-thin" => &[("font-weight", "100")],
        "font-light" => &[("font-weight", "300")],
        "font-normal" => &[("font-weight", "400")],
        "font-medium" => &[("font-weight", "500")],
        "font-semibold" => &[("font-weight", "600")],
        "font-bold" => &[("font-weight", "700")],
        "font-extrabold" => &[("font-weight", "800")],
        "font-black" => &[("font-weight", "900")],
        "font-mono" => &[(
            "font-family",
            "ui-monospace, SFMono-Regular, Menlo, Consolas, monospace",
        )],

        "rounded-none" => &[("border-radius", "0px")],
        "rounded-sm" => &[("border-radius", "0.125rem")],
        "rounded" => &[("border-radius", "0.25rem")],
        "rounded-md" => &[("border-radius", "0.375rem")],
        "rounded-lg" => &[("border-radius", "0.5rem")],
        "rounded-xl" => &[("border-radius", "0.75rem")],
        "rounded-2xl" => &[("border-radius", "1rem")],
        "rounded-full" => &[("border-radius", "9999px")],

        "border" => &[("border-width", "1px")],
        "border-0" => &[("border-width", "0px")],
        "border-2" => &[("border-width", "2px")],
        "border-4" => &[("border-width", "4px")],
        "border-t" => &[("border-top-width", "1px")],
        "border-b" => &[("border-bottom-width", "1px")],

        "object-cover" => &[("object-fit", "cover")],
        "object-contain" => &[("object-fit", "contain")],
        "object-center" => &[("object-position", "center")],

        "bg-clip-text" => &[("-webkit-background-clip", "text"), ("background-clip", "text")],
        "bg-gradient-to-t" => &[("background-image", "linear-gradient(to top, var(--tw-gradient-stops))")],
        "bg-gradient-to-r" => &[("background-image", "linear-gradient(to right, var(--tw-gradient-stops))")],
        "bg-gradient-to-b" => &[("background-image", "linear-gradient(to bottom, var(--tw-gradient-stops))")],
        "bg-gradient-to-l" => &[("background-image", "linear-gradient(to left, var(--tw-gradient-stops))")],
        "bg-gradient-to-tr" => &[("background-image", "linear-gradient(to top right, var(--tw-gradient-stops))")],
        "bg-gradient-to-br" => &[("background-image", "linear-gradient(to bottom right, var(--tw-gradient-stops))")],
        "bg-gradient-to-bl" => &[("background-image", "linear-gradient(to bottom left, var(--tw-gradient-stops))")],
        "bg-gradient-to-tl" => &[("background-image", "linear-gradient(to top left, var(--tw-gradient-stops))")],

        "transition" => &[
            ("transition-property", "color, background-color, border-color, opacity, transform"),
            ("transition-timing-function", "cubic-bezier(0.4, 0, 0.2, 1)"),
            ("transition-duration", "150ms"),
        ],
        "cursor-pointer" => &[("cursor", "pointer")],
        "list-disc" => &[("list-style-type", "disc")],
        "list-none" => &[("list-style-type", "none")],

        "w-full" => &[("width", "100%")],
        "w-auto" => &[("width", "auto")],
        "w-screen" => &[("width", "100vw")],
        "h-full" => &[("height", "100%")],
        "h-auto" => &[("height", "auto")],
        "h-screen" => &[("height", "100vh")],
        "min-h-screen" => &[("min-height", "100vh")],
        "max-w-none" => &[("max-width", "none")],
        "max-w-prose" => &[("max-width", "65ch")],
        "max-w-full" => &[("max-width", "100%")],
        _ => return None,
    };
    Some(declarations)
}

fn dynamic_utility(utility: &str) -> Option<RuleBody> {
    let (negative, utility) = match utility.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, utility),
    };

    if let Some(body) = spacing_utility(utility, negative) {
        return Some(body);
    }
    if negative {
        return None;
    }

    sizing_utility(utility)
        .or_else(|| text_size(utility))
        .or_else(|| grid_utility(utility))
        .or_else(|| color_utility(utility))
}

const SPACING_PROPERTIES: &[(&str, &[&str])] = &[
    ("p", &["padding"]),
    ("px", &["padding-left", "padding-right"]),
    ("py", &["padding-top", "padding-bottom"]),
    ("pt", &["padding-top"]),
    ("pr", &["padding-right"]),
    ("pb", &["padding-bottom"]),
    ("pl", &["padding-left"]),
    ("m", &["margin"]),
    ("mx", &["margin-left", "margin-right"]),
    ("my", &["margin-top", "margin-bottom"]),
    ("mt", &["margin-top"]),
    ("mr", &["margin-right"]),
    ("mb", &["margin-bottom"]),
    ("ml", &["margin-left"]),
    ("gap", &["gap"]),
    ("gap-x", &["column-gap"]),
    ("gap-y", &["row-gap"]),
];

/// Padding, margin, gap and translate.
fn spacing_utility(utility: &str, negative: bool) -> Option<RuleBody> {
    for (axis, function) in [("translate-x-", "translateX"), ("translate-y-", "translateY")] {
        if let Some(value) = utility.strip_prefix(axis) {
            let length = signed(spacing(value)?, negative);
            let mut body = RuleBody::default();
            body.push("transform", format!("{function}({length})"));
            return Some(body);
        }
    }

    // Split at the last dash: `gap-x-2` is `gap-x` with value `2`.
    let (prefix, value) = utility.rsplit_once('-')?;
    let (_, properties) = SPACING_PROPERTIES.iter().find(|(p, _)| *p == prefix)?;

    let is_margin = prefix.starts_with('m');
    let length = match value {
        "auto" if is_margin && !negative => "auto".to_string(),
        _ => {
            if negative && !is_margin {
                return None;
            }
            signed(spacing(value)?, negative)
        }
    };

    let mut body = RuleBody::default();
    for property in *properties {
        body.push(property, length.clone());
    }
    Some(body)
}

fn signed(length: String, negative: bool) -> String {
    if negative && length != "0px" {
        format!("-{length}")
    } else {
        length
    }
}

const SPACING_SCALE: &[f64] = &[
    0.5, 1.0, 1.5, 2.0, 2.5, 3.0, 3.5, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0, 14.0,
    16.0, 20.0, 24.0, 28.0, 32.0, 36.0, 40.0, 44.0, 48.0, 52.0, 56.0, 60.0, 64.0, 72.0, 80.0,
    96.0,
];

/// Spacing scale value: `0`, `px`, or a step of 0.25rem.
fn spacing(value: &str) -> Option<String> {
    match value {
        "0" => return Some("0px".to_string()),
        "px" => return Some("1px".to_string()),
        _ => {}
    }
    let step: f64 = value.parse().ok()?;
    SPACING_SCALE
        .contains(&step)
        .then(|| format!("{}rem", step / 4.0))
}

fn sizing_utility(utility: &str) -> Option<RuleBody> {
    if let Some(screen) = utility.strip_prefix("max-w-screen-") {
        let bp = Breakpoint::from_prefix(screen)?;
        let mut body = RuleBody::default();
        body.push("max-width", format!("{}px", bp.min_width()));
        return Some(body);
    }

    if let Some(size) = utility.strip_prefix("max-w-") {
        let width = match size {
            "xs" => "20rem",
            "sm" => "24rem",
            "md" => "28rem",
            "lg" => "32rem",
            "xl" => "36rem",
            "2xl" => "42rem",
            "3xl" => "48rem",
            "4xl" => "56rem",
            "5xl" => "64rem",
            "6xl" => "72rem",
            "7xl" => "80rem",
            _ => return None,
        };
        return Some(RuleBody::new(&[("max-width", width)]));
    }

    let (property, value) = if let Some(v) = utility.strip_prefix("w-") {
        ("width", v)
    } else if let Some(v) = utility.strip_prefix("h-") {
        ("height", v)
    } else {
        return None;
    };

    let length = match value.split_once('/') {
        Some((num, den)) => fraction(num, den)?,
        None => spacing(value)?,
    };

    let mut body = RuleBody::default();
    body.push(property, length);
    Some(body)
}

fn fraction(num: &str, den: &str) -> Option<String> {
    let num: u8 = num.parse().ok()?;
    let den: u8 = den.parse().ok()?;
    if !(2..=12).contains(&den) || num == 0 || num >= den {
        return None;
    }
    let percent = f64::from(num) * 100.0 / f64::from(den);
    let rounded = (percent * 1_000_000.0).round() / 1_000_000.0;
    Some(format!("{rounded}%"))
}

fn text_size(utility: &str) -> Option<RuleBody> {
    let (size, line_height) = match utility.strip_prefix("text-")? {
        "xs" => ("0.75rem", "1rem"),
        "sm" => ("0.875rem", "1.25rem"),
        "base" => ("1rem", "1.5rem"),
        "lg" => ("1.125rem", "1.75rem"),
        "xl" => ("1.25rem", "1.75rem"),
        "2xl" => ("1.5rem", "2rem"),
        "3xl" => ("1.875rem", "2.25rem"),
        "4xl" => ("2.25rem", "2.5rem"),
        "5xl" => ("3rem", "1"),
        "6xl" => ("3.75rem", "1"),
        _ => return None,
    };
    Some(RuleBody::new(&[
        ("font-size", size),
        ("line-height", line_height),
    ]))
}

fn grid_utility(utility: &str) -> Option<RuleBody> {
    if let Some(n) = utility.strip_prefix("grid-cols-") {
        let n: u8 = n.parse().ok().filter(|n| (1..=12).contains(n))?;
        let mut body = RuleBody::default();
        body.push("grid-template-columns", format!("repeat({n}, minmax(0, 1fr))"));
        return Some(body);
    }
    if let Some(n) = utility.strip_prefix("col-span-") {
        let n: u8 = n.parse().ok().filter(|n| (1..=12).contains(n))?;
        let mut body = RuleBody::default();
        body.push("grid-column", format!("span {n} / span {n}"));
        return Some(body);
    }
    if let Some(step) = utility.strip_prefix("leading-") {
        let step: u8 = step.parse().ok().filter(|n| (3..=10).contains(n))?;
        let mut body = RuleBody::default();
        body.push("line-height", format!("{}rem", f64::from(step) / 4.0));
        return Some(body);
    }
    None
}

fn color_value(token: &str) -> Option<String> {
    match token {
        "transparent" => Some("transparent".to_string()),
        "current" => Some("currentColor".to_string()),
        _ => color(token).map(str::to_string),
    }
}

fn color_utility(utility: &str) -> Option<RuleBody> {
    let (prefix, token) = utility.split_once('-')?;
    let value = color_value(token)?;

    let mut body = RuleBody::default();
    match prefix {
        "bg" => body.push("background-color", value),
        "text" => body.push("color", value),
        "border" => body.push("border-color", value),
        "from" => {
            let fade = match hex_to_rgb(&value) {
                Some((r, g, b)) => format!("rgb({r} {g} {b} / 0)"),
                None => "transparent".to_string(),
            };
            body.push("--tw-gradient-from", value);
            body.push("--tw-gradient-to", fade);
            body.push(
                "--tw-gradient-stops",
                "var(--tw-gradient-from), var(--tw-gradient-to)",
            );
        }
        "to" => body.push("--tw-gradient-to", value),
        _ => return None,
    }
    Some(body)
}
