//! Built-in language definitions.
//!
//! Each built-in is constructed once on first use and shared by every
//! caller afterwards.

mod llvm;

use std::sync::{Arc, OnceLock};

use crate::definition::LanguageDefinition;
use crate::error::DefinitionError;

type Cached = OnceLock<Result<Arc<LanguageDefinition>, DefinitionError>>;

static LLVM: Cached = OnceLock::new();

/// The LLVM IR definition.
pub fn llvm() -> Result<Arc<LanguageDefinition>, DefinitionError> {
    LLVM.get_or_init(llvm::definition).clone()
}

/// Every built-in language.
pub fn all() -> Result<Vec<Arc<LanguageDefinition>>, DefinitionError> {
    Ok(vec![llvm()?])
}

/// Find a built-in by (case-insensitive) name.
pub fn by_name(name: &str) -> Result<Option<Arc<LanguageDefinition>>, DefinitionError> {
    Ok(all()?
        .into_iter()
        .find(|def| def.name().eq_ignore_ascii_case(name)))
}

/// Find a built-in by file extension, without the leading dot.
pub fn for_extension(ext: &str) -> Result<Option<Arc<LanguageDefinition>>, DefinitionError> {
    Ok(all()?
        .into_iter()
        .find(|def| def.extensions().any(|e| e.eq_ignore_ascii_case(ext))))
}
