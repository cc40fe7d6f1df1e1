use shadow_rs::BuildPattern;
use shadow_rs::ShadowBuilder;

/// Build metadata for `--version`, rebuilt lazily as git or sources change.
fn main() -> std::io::Result<()> {
    ShadowBuilder::builder()
        .build_pattern(BuildPattern::Lazy)
        .deny_const(Default::default())
        .build()
        .map_err(|e| std::io::Error::other(format!("Failed to generate build info: {e}")))?;

    Ok(())
}
