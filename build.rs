use cbindgen::{Config, EnumConfig, ExportConfig, ItemType, Language, MacroExpansionConfig};
use std::env;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

fn main() {
    let crate_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let package_name = env::var("CARGO_PKG_NAME").unwrap();
    let output_file = out_dir.join(format!("{}.h", package_name)).display().to_string();

    let config = Config {
        include_guard: Some("M4SYNTAX_RS".into()),
        language: Language::C,
        macro_expansion: MacroExpansionConfig { bitflags: true },
        sort_by: cbindgen::SortKey::Name,
        documentation: false,
        enumeration: EnumConfig {
            prefix_with_name: true,
            ..Default::default()
        },
        export: ExportConfig {
            include: vec!["Category".into(), "SyntaxTable".into(), "BytesView".into(), "PairView".into()],
            item_types: vec![
                ItemType::Constants,
                ItemType::Globals,
                ItemType::Enums,
                ItemType::Structs,
                ItemType::Unions,
                ItemType::Typedefs,
                ItemType::OpaqueItems,
                ItemType::Functions,
            ],
            ..Default::default()
        },
        ..Default::default()
    };

    let mut buf = Vec::new();
    cbindgen::generate_with_config(&crate_dir, config).unwrap().write(&mut buf);

    let mut f = File::create(&output_file).unwrap();
    f.write_all(&buf).unwrap();
}
