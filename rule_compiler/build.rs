// build.rs - TOML-driven compile-time limit generation
use std::env;
use std::fs;
use std::path::Path;

#[derive(serde::Deserialize)]
struct CompileTimeConfig {
    lexical: LexicalLimits,
    logging: LoggingLimits,
}

#[derive(serde::Deserialize)]
struct LexicalLimits {
    max_identifier_length: usize,
    max_literal_size: usize,
    max_hex_nesting_depth: usize,
}

#[derive(serde::Deserialize)]
struct LoggingLimits {
    log_buffer_size: usize,
    max_log_message_length: usize,
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=RULEC_BUILD_PROFILE");
    println!("cargo:rerun-if-env-changed=RULEC_CONFIG_DIR");

    let profile = env::var("RULEC_BUILD_PROFILE").unwrap_or_else(|_| "development".to_string());
    let config_dir = env::var("RULEC_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    // Find workspace root (parent of rule_compiler directory)
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let workspace_root = Path::new(&manifest_dir)
        .parent()
        .expect("Could not find workspace root (parent directory)");

    let config_path = workspace_root
        .join(&config_dir)
        .join(format!("{}.toml", profile));

    println!("cargo:rerun-if-changed={}", config_path.display());

    if !config_path.exists() {
        panic!(
            "Configuration file not found: {}\nWorkspace root: {}\nLooking for: {}/{}/{}.toml",
            config_path.display(),
            workspace_root.display(),
            workspace_root.display(),
            config_dir,
            profile
        );
    }

    let config_content = fs::read_to_string(&config_path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", config_path.display(), e));

    let config: CompileTimeConfig = toml::from_str(&config_content)
        .unwrap_or_else(|e| panic!("Invalid TOML in {}: {}", config_path.display(), e));

    validate_limits(&config, &profile);
    generate_constants(&config, &profile);

    println!("cargo:rustc-env=RULEC_BUILD_PROFILE={}", profile);
    println!("cargo:rustc-env=RULEC_CONFIG_DIR={}", config_dir);
}

fn validate_limits(config: &CompileTimeConfig, profile: &str) {
    // The lexer keeps a single accumulation buffer per instance.
    const ABSOLUTE_MAX_LITERAL_SIZE: usize = 16 * 1024 * 1024;

    if config.lexical.max_identifier_length == 0 {
        panic!("LIMITS: max_identifier_length cannot be zero");
    }

    if config.lexical.max_literal_size == 0
        || config.lexical.max_literal_size > ABSOLUTE_MAX_LITERAL_SIZE
    {
        panic!("LIMITS: max_literal_size must be in 1..={ABSOLUTE_MAX_LITERAL_SIZE}");
    }

    // The default byte-pattern parser recurses once per nested alternation.
    const ABSOLUTE_MAX_HEX_NESTING_DEPTH: usize = 1024;

    if config.lexical.max_hex_nesting_depth == 0
        || config.lexical.max_hex_nesting_depth > ABSOLUTE_MAX_HEX_NESTING_DEPTH
    {
        panic!("LIMITS: max_hex_nesting_depth must be in 1..={ABSOLUTE_MAX_HEX_NESTING_DEPTH}");
    }

    if config.logging.log_buffer_size < 100 || config.logging.log_buffer_size > 100_000 {
        panic!("LIMITS: log_buffer_size must be in 100..=100000");
    }

    if profile == "production" && config.logging.max_log_message_length > 4096 {
        panic!("PRODUCTION: max_log_message_length too high for production");
    }
}

fn generate_constants(config: &CompileTimeConfig, profile: &str) {
    let out_dir = env::var("OUT_DIR").unwrap();
    let output_path = Path::new(&out_dir).join("constants.rs");

    let constants_code = format!(
        r#"
// Generated compile-time constants from TOML configuration
// Profile: {}
// DO NOT EDIT - Generated by build.rs

pub mod compile_time {{
    pub mod lexical {{
        pub const MAX_IDENTIFIER_LENGTH: usize = {};
        pub const MAX_LITERAL_SIZE: usize = {};
        pub const MAX_HEX_NESTING_DEPTH: usize = {};
    }}

    pub mod logging {{
        pub const LOG_BUFFER_SIZE: usize = {};
        pub const MAX_LOG_MESSAGE_LENGTH: usize = {};
    }}
}}
"#,
        profile,
        config.lexical.max_identifier_length,
        config.lexical.max_literal_size,
        config.lexical.max_hex_nesting_depth,
        config.logging.log_buffer_size,
        config.logging.max_log_message_length,
    );

    fs::write(output_path, constants_code).unwrap();
}
