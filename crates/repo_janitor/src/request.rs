//! Validated operation requests.

use std::fmt;

use clap::ValueEnum;

use crate::errors::Error;

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;

/// The operations accepted by `--operation`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Operation {
    /// Search the organization for a keyword and delete every match
    DeleteByKeyword,
    /// Delete repositories whose name starts with the invalid marker
    DeleteInvalid,
    /// Print the name of every repository in the organization
    ListAll,
    /// Delete a single repository
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::DeleteByKeyword => "delete-by-keyword",
            Operation::DeleteInvalid => "delete-invalid",
            Operation::ListAll => "list-all",
            Operation::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// An operation together with the values it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationRequest {
    DeleteByKeyword { keyword: String },
    DeleteInvalid,
    ListAll,
    Delete { repo: String },
}

impl OperationRequest {
    /// Pairs an operation with its companion flag.
    ///
    /// Empty values count as missing. Flags the operation does not use are ignored.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArguments` when `delete-by-keyword` has no keyword or
    /// `delete` has no repository name.
    pub fn new(
        operation: Operation,
        keyword: Option<&str>,
        repo: Option<&str>,
    ) -> Result<Self, Error> {
        match operation {
            Operation::DeleteByKeyword => match non_empty(keyword) {
                Some(keyword) => Ok(OperationRequest::DeleteByKeyword {
                    keyword: keyword.to_string(),
                }),
                None => Err(Error::InvalidArguments(
                    "If deleting repositories by keyword, the '--keyword' flag must be set"
                        .to_string(),
                )),
            },
            Operation::DeleteInvalid => Ok(OperationRequest::DeleteInvalid),
            Operation::ListAll => Ok(OperationRequest::ListAll),
            Operation::Delete => match non_empty(repo) {
                Some(repo) => Ok(OperationRequest::Delete {
                    repo: repo.to_string(),
                }),
                None => Err(Error::InvalidArguments(
                    "--repo <repo-name> must be passed in as a flag when using the 'delete' operation"
                        .to_string(),
                )),
            },
        }
    }

    /// The operation this request performs.
    pub fn operation(&self) -> Operation {
        match self {
            OperationRequest::DeleteByKeyword { .. } => Operation::DeleteByKeyword,
            OperationRequest::DeleteInvalid => Operation::DeleteInvalid,
            OperationRequest::ListAll => Operation::ListAll,
            OperationRequest::Delete { .. } => Operation::Delete,
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
