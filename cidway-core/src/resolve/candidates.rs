use crate::resolve::{ResourceIdentifier, Scheme};

/// Path segment under which IPFS gateways serve content (`<origin>/ipfs/<cid>`).
const IPFS_NAMESPACE: &str = "ipfs";

/// Optional sub-path some Grove resources are stored under.
const FILE_PREFIX: &str = "file/";

/// Ordered, non-empty list of upstream paths to try, most likely first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateList(Vec<ResourceIdentifier>);

impl CandidateList {
    fn single(candidate: ResourceIdentifier) -> Self {
        Self(vec![candidate])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResourceIdentifier> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[ResourceIdentifier] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a CandidateList {
    type Item = &'a ResourceIdentifier;
    type IntoIter = std::slice::Iter<'a, ResourceIdentifier>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Generates the upstream paths to attempt for a normalized identifier.
///
/// IPFS: `[ipfs/<id>]`.
/// Grove: `[<id>, file/<id>]`, or `[<id without file/>, <id>]` when the prefix is already there.
pub fn candidates(scheme: Scheme, id: &ResourceIdentifier) -> CandidateList {
    match scheme {
        Scheme::Ipfs => CandidateList::single(ResourceIdentifier::new_unchecked(format!(
            "{IPFS_NAMESPACE}/{id}"
        ))),
        Scheme::Grove => grove_candidates(id),
    }
}

fn grove_candidates(id: &ResourceIdentifier) -> CandidateList {
    match id.as_str().strip_prefix(FILE_PREFIX) {
        // `file/` alone has no bare form to try.
        Some(bare) if bare.trim_start_matches('/').is_empty() => CandidateList::single(id.clone()),
        Some(bare) => CandidateList(vec![
            ResourceIdentifier::new_unchecked(bare.trim_start_matches('/')),
            id.clone(),
        ]),
        None => CandidateList(vec![
            id.clone(),
            ResourceIdentifier::new_unchecked(format!("{FILE_PREFIX}{id}")),
        ]),
    }
}
