//! Display-labelled enums.
//!
//! Every status, category or method the dashboard shows is a closed set with a
//! human label. The label doubles as the serde name and as the accepted form
//! input (matched case-insensitively).

use std::fmt;

/// A label that did not match any variant of a labelled enum.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownLabel {
    pub kind: &'static str,
    pub value: String,
}

/// Visual/logical category a value renders as (badge variant).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Success,
    Warning,
    Danger,
    Info,
    Neutral,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Success => "success",
            Tone::Warning => "warning",
            Tone::Danger => "danger",
            Tone::Info => "info",
            Tone::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declare an enum whose variants carry a fixed display label.
macro_rules! label_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            serde::Serialize, serde::Deserialize,
        )]
        $vis enum $name {
            $( $(#[$vmeta])* #[serde(rename = $label)] $variant ),+
        }

        impl $name {
            /// All variants in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Display label.
            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.label())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::models::UnknownLabel;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| v.label().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| $crate::models::UnknownLabel {
                        kind: stringify!($name),
                        value: wanted.to_string(),
                    })
            }
        }
    };
}

pub(crate) use label_enum;

label_enum! {
    /// Active/inactive flag shared by patients and catalogue tests.
    pub enum ActiveStatus {
        Active => "active",
        Inactive => "inactive",
    }
}

impl ActiveStatus {
    pub fn tone(&self) -> Tone {
        match self {
            ActiveStatus::Active => Tone::Success,
            ActiveStatus::Inactive => Tone::Neutral,
        }
    }
}

label_enum! {
    pub enum Gender {
        Male => "Male",
        Female => "Female",
        Other => "Other",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_round_trip() {
        assert_eq!(ActiveStatus::Active.label(), "active");
        assert_eq!("INACTIVE".parse::<ActiveStatus>().unwrap(), ActiveStatus::Inactive);
        assert_eq!(" female ".parse::<Gender>().unwrap(), Gender::Female);
    }

    #[test]
    fn test_unknown_label() {
        let err = "archived".parse::<ActiveStatus>().unwrap_err();
        assert_eq!(err.kind, "ActiveStatus");
        assert_eq!(err.value, "archived");
        assert_eq!(err.to_string(), "unknown ActiveStatus 'archived'");
    }

    #[test]
    fn test_serde_uses_label() {
        let json = serde_json::to_string(&Gender::Male).unwrap();
        assert_eq!(json, "\"Male\"");
        let back: ActiveStatus = serde_json::from_str("\"inactive\"").unwrap();
        assert_eq!(back, ActiveStatus::Inactive);
    }
}
