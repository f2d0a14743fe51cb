use anyhow::Context;
use camino::Utf8Path;
use monodep_types::Manifest;

/// Read and parse `<dir>/package.json`.
pub fn read_manifest(dir: &Utf8Path) -> anyhow::Result<Manifest> {
    let path = dir.join("package.json");
    let text = std::fs::read_to_string(&path).with_context(|| format!("read {path}"))?;
    let manifest: Manifest =
        serde_json::from_str(&text).with_context(|| format!("parse {path}"))?;
    Ok(manifest)
}

/// Read `<dir>/package.json` and require a declared name.
pub fn read_named_manifest(dir: &Utf8Path) -> anyhow::Result<(String, Manifest)> {
    let manifest = read_manifest(dir)?;
    let name = manifest
        .name
        .clone()
        .with_context(|| format!("package.json in {dir} declares no \"name\""))?;
    Ok((name, manifest))
}
