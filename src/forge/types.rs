/// A merged pull request as seen by the changelog builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    pub user: String,
    pub labels: Vec<String>,
}
