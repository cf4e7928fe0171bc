use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Bucket {
    pub id: String,

    pub name: String,

    #[serde(rename = "orgID")]
    pub org_id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Buckets {
    #[serde(default)]
    pub buckets: Vec<Bucket>,
}
