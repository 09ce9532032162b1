//! Alignment links and the two DP engines that produce them.

pub mod anchor;
pub mod length;
pub mod overlap;

/// An alignment record mapping zero-or-more source sentences to
/// zero-or-more target sentences.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub src_ids: Vec<String>,
    pub trg_ids: Vec<String>,
    pub common_time: Option<f64>,
    pub non_common_time: Option<f64>,
    pub overlap_ratio: Option<f64>,
}

impl Link {
    fn empty_src(id: String) -> Self {
        Self {
            src_ids: vec![id],
            trg_ids: vec![],
            common_time: None,
            non_common_time: None,
            overlap_ratio: None,
        }
    }

    fn empty_trg(id: String) -> Self {
        Self {
            src_ids: vec![],
            trg_ids: vec![id],
            common_time: None,
            non_common_time: None,
            overlap_ratio: None,
        }
    }

    pub fn is_empty_link(&self) -> bool {
        self.src_ids.is_empty() || self.trg_ids.is_empty()
    }
}
