use super::{GenerateErrorKind, TargetGenerator};

/// Generates a group target which only has common values.
pub fn generate(_generator: &mut TargetGenerator) -> Result<(), GenerateErrorKind> {
    Ok(())
}
