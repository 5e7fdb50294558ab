use std::fmt;

/// A document path, e.g. `ceremonies/c1/circuits/0`. Collection paths are
/// the even-length prefixes: `ceremonies/`, `ceremonies/{cid}/circuits/`,
/// `ceremonies/{cid}/participants/`,
/// `ceremonies/{cid}/participants/{pid}/timeouts/`.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Path(Vec<String>);

impl Path {
    pub fn new(segments: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Path(segments.into_iter().map(Into::into).collect())
    }

    pub fn ceremonies() -> Self {
        Path::new(["ceremonies"])
    }

    pub fn ceremony(ceremony_id: &str) -> Self {
        Path::new(["ceremonies", ceremony_id])
    }

    pub fn circuits(ceremony_id: &str) -> Self {
        Path::new(["ceremonies", ceremony_id, "circuits"])
    }

    pub fn circuit(ceremony_id: &str, circuit_id: &str) -> Self {
        Path::new(["ceremonies", ceremony_id, "circuits", circuit_id])
    }

    pub fn participants(ceremony_id: &str) -> Self {
        Path::new(["ceremonies", ceremony_id, "participants"])
    }

    pub fn participant(ceremony_id: &str, participant_id: &str) -> Self {
        Path::new(["ceremonies", ceremony_id, "participants", participant_id])
    }

    pub fn timeouts(ceremony_id: &str, participant_id: &str) -> Self {
        Path::new([
            "ceremonies",
            ceremony_id,
            "participants",
            participant_id,
            "timeouts",
        ])
    }

    pub fn timeout(ceremony_id: &str, participant_id: &str, timeout_id: &str) -> Self {
        Path::new([
            "ceremonies",
            ceremony_id,
            "participants",
            participant_id,
            "timeouts",
            timeout_id,
        ])
    }

    pub fn child(&self, segment: impl Into<String>) -> Path {
        let mut v = self.0.clone();
        v.push(segment.into());
        Path(v)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("/"))
    }
}
