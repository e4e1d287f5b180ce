#[derive(thiserror::Error, Debug)]
pub enum InstantiateErrorKind {
    #[error("Missing dependency value at index {index}")]
    MissingDependency { index: usize },
    #[error("Dependency value at index {index} has unexpected type, expected {expected}")]
    DependencyType { index: usize, expected: &'static str },
    #[error(transparent)]
    Custom(#[from] anyhow::Error),
}
