//! Utilities contributed by optional plugins.

use super::RuleBody;

const FILL_PARENT: &[(&str, &str)] = &[
    ("position", "absolute"),
    ("height", "100%"),
    ("width", "100%"),
    ("top", "0"),
    ("right", "0"),
    ("bottom", "0"),
    ("left", "0"),
];

const UNFILL_PARENT: &[(&str, &str)] = &[
    ("position", "static"),
    ("height", "auto"),
    ("width", "auto"),
    ("top", "auto"),
    ("right", "auto"),
    ("bottom", "auto"),
    ("left", "auto"),
];

/// `aspect-w-{1..16}`, `aspect-h-{1..16}` and `aspect-none`.
pub(super) fn aspect_ratio(utility: &str) -> Option<Vec<RuleBody>> {
    if utility == "aspect-none" {
        return Some(vec![
            RuleBody::new(&[("position", "static"), ("padding-bottom", "0")]),
            RuleBody::with_suffix(" > *", UNFILL_PARENT),
        ]);
    }

    if let Some(n) = utility.strip_prefix("aspect-w-").and_then(ratio_part) {
        let mut body = RuleBody::new(&[
            ("position", "relative"),
            (
                "padding-bottom",
                "calc(var(--tw-aspect-h) / var(--tw-aspect-w) * 100%)",
            ),
        ]);
        body.push("--tw-aspect-w", n.to_string());
        return Some(vec![body, RuleBody::with_suffix(" > *", FILL_PARENT)]);
    }

    if let Some(n) = utility.strip_prefix("aspect-h-").and_then(ratio_part) {
        let mut body = RuleBody::default();
        body.push("--tw-aspect-h", n.to_string());
        return Some(vec![body]);
    }

    None
}

fn ratio_part(value: &str) -> Option<u8> {
    value.parse().ok().filter(|n| (1..=16).contains(n))
}

/// `prose` and `prose-invert`.
pub(super) fn typography(utility: &str) -> Option<Vec<RuleBody>> {
    match utility {
        "prose" => Some(prose()),
        "prose-invert" => Some(vec![RuleBody::new(&[
            ("--tw-prose-body", "#d1d5db"),
            ("--tw-prose-headings", "#ffffff"),
            ("--tw-prose-links", "#ffffff"),
            ("--tw-prose-bold", "#ffffff"),
            ("--tw-prose-code", "#ffffff"),
            ("--tw-prose-quotes", "#f3f4f6"),
            ("--tw-prose-quote-borders", "#374151"),
            ("--tw-prose-bullets", "#4b5563"),
        ])]),
        _ => None,
    }
}

fn prose() -> Vec<RuleBody> {
    vec![
        RuleBody::new(&[
            ("--tw-prose-body", "#374151"),
            ("--tw-prose-headings", "#111827"),
            ("--tw-prose-links", "#111827"),
            ("--tw-prose-bold", "#111827"),
            ("--tw-prose-code", "#111827"),
            ("--tw-prose-quotes", "#111827"),
            ("--tw-prose-quote-borders", "#e5e7eb"),
            ("--tw-prose-bullets", "#d1d5db"),
            ("color", "var(--tw-prose-body)"),
            ("max-width", "65ch"),
            ("font-size", "1rem"),
            ("line-height", "1.75"),
        ]),
        RuleBody::with_suffix(
            " :where(p)",
            &[("margin-top", "1.25em"), ("margin-bottom", "1.25em")],
        ),
        RuleBody::with_suffix(
            " :where(a)",
            &[
                ("color", "var(--tw-prose-links)"),
                ("text-decoration", "underline"),
                ("font-weight", "500"),
            ],
        ),
        RuleBody::with_suffix(
            " :where(strong)",
            &[("color", "var(--tw-prose-bold)"), ("font-weight", "600")],
        ),
        RuleBody::with_suffix(
            " :where(h1)",
            &[
                ("color", "var(--tw-prose-headings)"),
                ("font-size", "2.25em"),
                ("font-weight", "800"),
                ("margin-top", "0"),
                ("margin-bottom", "0.8888889em"),
                ("line-height", "1.1111111"),
            ],
        ),
        RuleBody::with_suffix(
            " :where(h2)",
            &[
                ("color", "var(--tw-prose-headings)"),
                ("font-size", "1.5em"),
                ("font-weight", "700"),
                ("margin-top", "2em"),
                ("margin-bottom", "1em"),
                ("line-height", "1.3333333"),
            ],
        ),
        RuleBody::with_suffix(
            " :where(h3)",
            &[
                ("color", "var(--tw-prose-headings)"),
                ("font-size", "1.25em"),
                ("font-weight", "600"),
                ("margin-top", "1.6em"),
                ("margin-bottom", "0.6em"),
                ("line-height", "1.6"),
            ],
        ),
        RuleBody::with_suffix(
            " :where(ul)",
            &[
                ("list-style-type", "disc"),
                ("margin-top", "1.25em"),
                ("margin-bottom", "1.25em"),
                ("padding-left", "1.625em"),
            ],
        ),
        RuleBody::with_suffix(
            " :where(ol)",
            &[
                ("list-style-type", "decimal"),
                ("margin-top", "1.25em"),
                ("margin-bottom", "1.25em"),
                ("padding-left", "1.625em"),
            ],
        ),
        RuleBody::with_suffix(" :where(ul > li)::marker", &[("color", "var(--tw-prose-bullets)")]),
        RuleBody::with_suffix(
            " :where(blockquote)",
            &[
                ("color", "var(--tw-prose-quotes)"),
                ("font-style", "italic"),
                ("border-left", "0.25rem solid var(--tw-prose-quote-borders)"),
                ("padding-left", "1em"),
            ],
        ),
        RuleBody::with_suffix(
            " :where(code)",
            &[
                ("color", "var(--tw-prose-code)"),
                ("font-weight", "600"),
                ("font-size", "0.875em"),
            ],
        ),
        RuleBody::with_suffix(
            " :where(pre)",
            &[
                ("overflow-x", "auto"),
                ("border-radius", "0.375rem"),
                ("padding", "0.8571429em 1.1428571em"),
                ("font-size", "0.875em"),
                ("line-height", "1.7142857"),
                ("margin-top", "1.7142857em"),
                ("margin-bottom", "1.7142857em"),
            ],
        ),
        RuleBody::with_suffix(
            " :where(pre code)",
            &[
                ("color", "inherit"),
                ("font-weight", "inherit"),
                ("font-size", "inherit"),
                ("background-color", "transparent"),
                ("padding", "0"),
            ],
        ),
        RuleBody::with_suffix(
            " :where(img)",
            &[("margin-top", "2em"), ("margin-bottom", "2em")],
        ),
        RuleBody::with_suffix(
            " :where(table)",
            &[("width", "100%"), ("text-align", "left"), ("font-size", "0.875em")],
        ),
    ]
}
