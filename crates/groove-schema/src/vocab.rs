//! Closed vocabularies a manifest draws its classification values from.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}', expected one of: {expected}")]
pub struct VocabularyError {
    pub kind: &'static str,
    pub value: String,
    pub expected: String,
}

macro_rules! closed_vocabulary {
    ($(#[$meta:meta])* $name:ident, $kind:literal { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Every member, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The exact manifest spelling of this value.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }

            /// Comma-separated list of every accepted spelling.
            pub fn expected() -> String {
                Self::ALL
                    .iter()
                    .map(|v| v.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            }
        }

        impl FromStr for $name {
            type Err = VocabularyError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    _ => Err(VocabularyError {
                        kind: $kind,
                        value: s.to_owned(),
                        expected: Self::expected(),
                    }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

closed_vocabulary!(
    /// Kind of store entry.
    AppType, "type" {
        Pwa => "pwa",
        Webapp => "webapp",
        LiveTileProvider => "livetileprovider",
        Style => "style",
        NativeApp => "nativeapp",
    }
);

closed_vocabulary!(
    /// Store shelf an entry is listed under. Matching is case-sensitive.
    Category, "category" {
        System => "System",
        Multimedia => "Multimedia",
        Internet => "Internet",
        Games => "Games",
        Development => "Development",
        ScienceEducation => "Science & Education",
        Reading => "Reading",
        Money => "Money",
        NavigationMaps => "Navigation & Maps",
        PhoneSms => "Phone & SMS",
        Security => "Security",
        SportsHealth => "Sports & Health",
        Theming => "Theming",
        Time => "Time",
        Writing => "Writing",
    }
);

closed_vocabulary!(
    /// Target platform of a `nativeapp` entry.
    Platform, "platform" {
        Android => "android",
        Windows => "windows",
        Linux => "linux",
    }
);
