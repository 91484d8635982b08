//! Tag labels and their color enumeration.

use serde::Deserialize;

/// Closed set of tag colors.
///
/// Each color selects one fixed pair of background and text utility classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTags {
    Slate,
    Gray,
    Zinc,
    Neutral,
    Stone,
    Red,
    Orange,
    Amber,
    Yellow,
    Lime,
    Green,
    Emerald,
    Teal,
    Cyan,
    Sky,
    Blue,
    Indigo,
    Violet,
    Purple,
    Fuchsia,
    Pink,
    Rose,
}

impl ColorTags {
    pub const ALL: [ColorTags; 22] = [
        Self::Slate,
        Self::Gray,
        Self::Zinc,
        Self::Neutral,
        Self::Stone,
        Self::Red,
        Self::Orange,
        Self::Amber,
        Self::Yellow,
        Self::Lime,
        Self::Green,
        Self::Emerald,
        Self::Teal,
        Self::Cyan,
        Self::Sky,
        Self::Blue,
        Self::Indigo,
        Self::Violet,
        Self::Purple,
        Self::Fuchsia,
        Self::Pink,
        Self::Rose,
    ];

    /// Palette name of this color.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Slate => "slate",
            Self::Gray => "gray",
            Self::Zinc => "zinc",
            Self::Neutral => "neutral",
            Self::Stone => "stone",
            Self::Red => "red",
            Self::Orange => "orange",
            Self::Amber => "amber",
            Self::Yellow => "yellow",
            Self::Lime => "lime",
            Self::Green => "green",
            Self::Emerald => "emerald",
            Self::Teal => "teal",
            Self::Cyan => "cyan",
            Self::Sky => "sky",
            Self::Blue => "blue",
            Self::Indigo => "indigo",
            Self::Violet => "violet",
            Self::Purple => "purple",
            Self::Fuchsia => "fuchsia",
            Self::Pink => "pink",
            Self::Rose => "rose",
        }
    }

    /// Utility classes for a tag of this color.
    pub const fn class(self) -> &'static str {
        match self {
            Self::Slate => "bg-slate-400 text-slate-900",
            Self::Gray => "bg-gray-400 text-gray-900",
            Self::Zinc => "bg-zinc-400 text-zinc-900",
            Self::Neutral => "bg-neutral-400 text-neutral-900",
            Self::Stone => "bg-stone-400 text-stone-900",
            Self::Red => "bg-red-400 text-red-900",
            Self::Orange => "bg-orange-400 text-orange-900",
            Self::Amber => "bg-amber-400 text-amber-900",
            Self::Yellow => "bg-yellow-400 text-yellow-900",
            Self::Lime => "bg-lime-400 text-lime-900",
            Self::Green => "bg-green-400 text-green-900",
            Self::Emerald => "bg-emerald-400 text-emerald-900",
            Self::Teal => "bg-teal-400 text-teal-900",
            Self::Cyan => "bg-cyan-400 text-cyan-900",
            Self::Sky => "bg-sky-400 text-sky-900",
            Self::Blue => "bg-blue-400 text-blue-900",
            Self::Indigo => "bg-indigo-400 text-indigo-900",
            Self::Violet => "bg-violet-400 text-violet-900",
            Self::Purple => "bg-purple-400 text-purple-900",
            Self::Fuchsia => "bg-fuchsia-400 text-fuchsia-900",
            Self::Pink => "bg-pink-400 text-pink-900",
            Self::Rose => "bg-rose-400 text-rose-900",
        }
    }
}

/// A colored label.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Tag {
    pub label: String,
    pub color: ColorTags,
}

impl Tag {
    pub fn new(label: impl Into<String>, color: ColorTags) -> Self {
        Self {
            label: label.into(),
            color,
        }
    }
}
