mod candidates_tests;
mod orchestrator_tests;

pub(crate) const CID_V0: &str = "QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG";
pub(crate) const CID_V1: &str = "bafybeigdyrzt5sfp7udm7hu76uh7y26nf3efuy3qabf3oc2gtqy55fbzdi";
