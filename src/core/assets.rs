//! Embedded default schemas and registries.
//!
//! The default contract/artifact schemas and the failure-mode registries are
//! baked into the binary so the CLI works without any external resource files.
//! Callers can still point at on-disk replacements via flags.

/// Macro to embed governance resources at compile time as text.
macro_rules! embedded_resources {
    ($($path:expr => $const_name:ident),* $(,)?) => {
        $(
            pub const $const_name: &str = include_str!(concat!("../../", $path));
        )*

        pub fn get_embedded_resource(path: &str) -> Option<&'static str> {
            match path {
                $( $path => Some($const_name), )*
                _ => None,
            }
        }

        pub fn list_resources() -> Vec<String> {
            vec![ $( $path.to_string(), )* ]
        }
    };
}

embedded_resources! {
    "schemas/v1.0.0/contract.schema.json" => EMBEDDED_CONTRACT_SCHEMA,
    "schemas/v1.0.0/artifact.schema.json" => EMBEDDED_ARTIFACT_SCHEMA,
    "registries/mappings.json" => EMBEDDED_MAPPINGS,
    "registries/err.json" => EMBEDDED_ERR_REGISTRY,
}

/// Schema version the embedded resources belong to.
pub const SCHEMA_VERSION: &str = "v1.0.0";
