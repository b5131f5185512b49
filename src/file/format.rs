use num_enum::TryFromPrimitive;

#[doc = r#"
The `format` field of the header chunk.

The decoder does not treat formats differently: every track chunk is decoded
and merged into the same [`Score`](super::Score). The format only tells the
consumer how the tracks were meant to relate to each other.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
pub enum FormatType {
    /// Format 0: a single track carrying every channel
    SingleMultiChannel = 0,
    /// Format 1: tracks played simultaneously
    Simultaneous = 1,
    /// Format 2: independent single-track patterns
    SequentiallyIndependent = 2,
}
