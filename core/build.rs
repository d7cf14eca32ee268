use std::env;
use std::fmt::Write;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CopyFile {
    envelope_image: String,
    envelope_hint: String,
    idle_title: String,
    idle_image: String,
    accepted_title: String,
    accepted_image: String,
    declined_title: String,
    yes_image: String,
    no_image: String,
    final_text: String,
    declined_text: String,
}

impl CopyFile {
    fn fields(&self) -> [(&'static str, &str); 11] {
        [
            ("envelope_image", self.envelope_image.as_str()),
            ("envelope_hint", self.envelope_hint.as_str()),
            ("idle_title", self.idle_title.as_str()),
            ("idle_image", self.idle_image.as_str()),
            ("accepted_title", self.accepted_title.as_str()),
            ("accepted_image", self.accepted_image.as_str()),
            ("declined_title", self.declined_title.as_str()),
            ("yes_image", self.yes_image.as_str()),
            ("no_image", self.no_image.as_str()),
            ("final_text", self.final_text.as_str()),
            ("declined_text", self.declined_text.as_str()),
        ]
    }
}

fn main() {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").expect("missing CARGO_MANIFEST_DIR"));
    let workspace_root = manifest_dir.parent().unwrap_or(&manifest_dir);
    let env_path = workspace_root.join(".env");
    let env_local_path = workspace_root.join(".env.local");

    let _ = dotenvy::from_filename(&env_local_path);
    let _ = dotenvy::from_filename(&env_path);

    println!("cargo:rerun-if-env-changed=LETTER_COPY_PATH");
    println!("cargo:rerun-if-changed={}", env_path.display());
    println!("cargo:rerun-if-changed={}", env_local_path.display());

    let copy_path = resolve_copy_path(workspace_root);
    println!("cargo:rerun-if-changed={}", copy_path.display());

    let contents = fs::read_to_string(&copy_path).unwrap_or_else(|err| {
        panic!(
            "failed to read letter copy at {}: {err}",
            copy_path.display()
        )
    });

    let copy: CopyFile = toml::from_str(&contents).unwrap_or_else(|err| {
        panic!(
            "failed to parse letter copy at {}: {err}",
            copy_path.display()
        )
    });

    validate(&copy, &copy_path);

    let mut output = String::new();
    writeln!(&mut output, "pub const LETTER_COPY: LetterCopy = LetterCopy {{").unwrap();
    for (name, value) in copy.fields() {
        writeln!(&mut output, "    {name}: {},", rust_string(value)).unwrap();
    }
    writeln!(&mut output, "}};").unwrap();

    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("missing OUT_DIR"));
    let out_path = out_dir.join("letter_copy.rs");
    fs::write(&out_path, output).unwrap_or_else(|err| {
        panic!("failed to write {}: {err}", out_path.display())
    });
}

fn resolve_copy_path(workspace_root: &Path) -> PathBuf {
    let env_value = env::var("LETTER_COPY_PATH").ok();
    let raw_path = match env_value {
        Some(value) if !value.trim().is_empty() => PathBuf::from(value),
        _ => workspace_root.join("letter.toml"),
    };
    if raw_path.is_relative() {
        workspace_root.join(raw_path)
    } else {
        raw_path
    }
}

fn rust_string(value: &str) -> String {
    format!("{:?}", value.trim())
}

fn validate(copy: &CopyFile, copy_path: &Path) {
    for (name, value) in copy.fields() {
        if value.trim().is_empty() {
            panic!("letter copy '{name}' cannot be empty in {}", copy_path.display());
        }
        if !name.ends_with("_image") {
            continue;
        }
        if value.starts_with("http://") || value.starts_with("https://") {
            panic!(
                "letter image '{name}' cannot be a URL in {}",
                copy_path.display()
            );
        }
        if value.starts_with("data:") {
            panic!(
                "letter image '{name}' cannot be a data URL in {}",
                copy_path.display()
            );
        }
    }
}
