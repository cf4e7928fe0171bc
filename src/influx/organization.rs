use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Organization {
    pub id: String,

    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Organizations {
    #[serde(default)]
    pub orgs: Vec<Organization>,
}
