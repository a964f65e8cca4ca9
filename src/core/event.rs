//! Audit attribution and the event emitted when metadata is saved.

use crate::{
    entities::Group,
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use sea_orm::{ConnectionTrait, EntityTrait};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Who a saved submission is attributed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Attribution {
    /// The acting user saved their own submission
    Own,
    /// The acting user saved on behalf of another user
    Individual {
        /// User the submission belongs to
        related_user_id: i64,
    },
    /// The submission belongs to a group
    Group {
        /// Group the submission belongs to
        group_id: i64,
        /// Display name of that group
        group_name: String,
    },
}

impl Attribution {
    /// Related user recorded in the audit log, if any.
    #[must_use]
    pub const fn related_user_id(&self) -> Option<i64> {
        match self {
            Self::Individual { related_user_id } => Some(*related_user_id),
            Self::Own | Self::Group { .. } => None,
        }
    }
}

/// Works out the attribution of a submission saved by `acting_user_id`.
///
/// A user id wins over a group id; the group's name is looked up so it can be
/// logged alongside the id.
///
/// # Errors
/// Returns [`Error::GroupNotFound`] when a group-owned submission points at an
/// unknown group.
pub async fn attribute<C>(
    db: &C,
    acting_user_id: i64,
    user_id: Option<i64>,
    group_id: Option<i64>,
) -> Result<Attribution>
where
    C: ConnectionTrait,
{
    match (user_id.filter(|id| *id != 0), group_id.filter(|id| *id != 0)) {
        (Some(user), _) if user == acting_user_id => Ok(Attribution::Own),
        (Some(user), _) => Ok(Attribution::Individual {
            related_user_id: user,
        }),
        (None, Some(group)) => {
            let found = Group::find_by_id(group)
                .one(db)
                .await?
                .ok_or(Error::GroupNotFound { id: group })?;
            Ok(Attribution::Group {
                group_id: group,
                group_name: found.name,
            })
        }
        (None, None) => Ok(Attribution::Own),
    }
}

/// Raised each time metadata is stored for a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessableUploaded {
    /// Localised event description
    pub description: String,
    /// Assignment instance
    pub assignment_id: i64,
    /// Submission the metadata belongs to
    pub submission_id: i64,
    /// Id of the stored record
    pub object_id: i64,
    /// User who triggered the save
    pub acting_user_id: i64,
    /// Owner of the submission
    pub attribution: Attribution,
    /// When the save happened
    pub time_created: DateTime<Utc>,
}

impl AssessableUploaded {
    /// Writes the event to the log.
    pub fn log(&self) {
        let (group_id, group_name) = match &self.attribution {
            Attribution::Group {
                group_id,
                group_name,
            } => (Some(*group_id), Some(group_name.as_str())),
            _ => (None, None),
        };
        info!(
            assignment = self.assignment_id,
            submission = self.submission_id,
            object = self.object_id,
            user = self.acting_user_id,
            related_user = ?self.attribution.related_user_id(),
            group = ?group_id,
            group_name = ?group_name,
            "{}",
            self.description
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_own_submission_has_no_related_user() -> Result<()> {
        let db = setup_test_db().await?;
        let attribution = attribute(&db, 5, Some(5), None).await?;
        assert_eq!(attribution, Attribution::Own);
        assert_eq!(attribution.related_user_id(), None);
        Ok(())
    }

    #[tokio::test]
    async fn test_other_user_is_related() -> Result<()> {
        let db = setup_test_db().await?;
        let attribution = attribute(&db, 5, Some(9), Some(3)).await?;
        assert_eq!(
            attribution,
            Attribution::Individual { related_user_id: 9 }
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_group_submission_resolves_name() -> Result<()> {
        let db = setup_test_db().await?;
        let group = create_test_group(&db, "Team Blue").await?;

        let attribution = attribute(&db, 5, Some(0), Some(group.id)).await?;
        assert_eq!(
            attribution,
            Attribution::Group {
                group_id: group.id,
                group_name: "Team Blue".to_string(),
            }
        );
        assert_eq!(attribution.related_user_id(), None);
        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_group_is_an_error() -> Result<()> {
        let db = setup_test_db().await?;
        let result = attribute(&db, 5, None, Some(404)).await;
        assert!(matches!(result, Err(Error::GroupNotFound { id: 404 })));
        Ok(())
    }

    #[tokio::test]
    async fn test_neither_user_nor_group() -> Result<()> {
        let db = setup_test_db().await?;
        assert_eq!(attribute(&db, 5, None, None).await?, Attribution::Own);
        Ok(())
    }
}
