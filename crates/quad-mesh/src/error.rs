/// Diagnostics for [`crate::read_connectivity`], surfaced as a
/// non-zero return with a message rather than a panic. Core algorithms
/// never produce or see one of these — contract violations there
/// panic instead.
#[derive(Debug, onlyerror::Error)]
pub enum MeshError {
    #[error("failed to read mesh file")]
    Io(#[from] std::io::Error),
    #[error("failed to parse an integer field")]
    ParseInt(#[from] std::num::ParseIntError),
    #[error("mesh file must start with a section header")]
    MissingFirstSection,
    #[error("sections must end with ']'")]
    UnterminatedSection,
    #[error("unknown section header: {0}")]
    UnknownSection(String),
    #[error("the [Forest Info] section must come first and set Nk and Nv")]
    InfoSectionMustComeFirst,
    #[error("[Forest Info] entries must be key=value pairs")]
    MalformedKeyValue,
    #[error("record has fewer than five integer fields")]
    MalformedRecord,
    #[error("section {0} has fewer entries than Nk")]
    IncompleteSection(&'static str),
    #[error("vertex index {0} out of range")]
    VertexOutOfRange(i32),
    #[error("tree index {0} out of range")]
    TreeIndexOutOfRange(i32),
    #[error("face index {0} out of range")]
    FaceOutOfRange(i32),
}
