//! Submission metadata records - Handles all reads and writes of stored field values.
//!
//! Each submission has at most one record. All functions are generic over the
//! connection so they work inside transactions as well.

use crate::{
    core::fields::Field,
    entities::{SubmissionMeta, submission_meta},
    errors::{Error, Result},
};
use sea_orm::{NotSet, Set, prelude::*};
use tracing::{debug, info, instrument};

/// Result of [`copy_to_submission`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    /// A new record was created for the destination submission
    Copied(submission_meta::Model),
    /// The source submission had no record
    NothingToCopy,
}

/// Finds the record of a submission, `None` when nothing was saved yet.
pub async fn get_by_submission<C>(
    db: &C,
    submission_id: i64,
) -> Result<Option<submission_meta::Model>>
where
    C: ConnectionTrait,
{
    SubmissionMeta::find()
        .filter(submission_meta::Column::Submission.eq(submission_id))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Inserts a new record with the given field values.
///
/// Fields absent from `values` are stored as null.
///
/// # Errors
/// Returns an error if the insert fails or does not yield a positive id.
#[instrument(skip(db, values))]
pub async fn insert<C>(
    db: &C,
    submission_id: i64,
    assignment_id: i64,
    values: &[(Field, String)],
) -> Result<submission_meta::Model>
where
    C: ConnectionTrait,
{
    let mut record = submission_meta::ActiveModel {
        id: NotSet,
        submission: Set(submission_id),
        assignment: Set(assignment_id),
        title: Set(None),
        meta1: Set(None),
        meta2: Set(None),
        meta3: Set(None),
        meta4: Set(None),
        meta5: Set(None),
    };
    for (field, value) in values {
        record.set_value(*field, Some(value.clone()));
    }

    let inserted = record.insert(db).await?;
    if inserted.id <= 0 {
        return Err(Error::Storage {
            message: format!("Insert for submission {submission_id} returned id {}", inserted.id),
        });
    }
    debug!("Inserted record {} for submission {}", inserted.id, submission_id);
    Ok(inserted)
}

/// Overwrites the given fields of an existing record, leaving the others as they are.
#[instrument(skip(db, existing, values), fields(record = existing.id))]
pub async fn update<C>(
    db: &C,
    existing: submission_meta::Model,
    values: &[(Field, String)],
) -> Result<submission_meta::Model>
where
    C: ConnectionTrait,
{
    if values.is_empty() {
        debug!("No field values submitted; record {} left unchanged", existing.id);
        return Ok(existing);
    }

    let mut record: submission_meta::ActiveModel = existing.into();
    for (field, value) in values {
        record.set_value(*field, Some(value.clone()));
    }
    record.update(db).await.map_err(Into::into)
}

/// Deletes every record that belongs to an assignment, returning how many went.
#[instrument(skip(db))]
pub async fn delete_for_assignment<C>(db: &C, assignment_id: i64) -> Result<u64>
where
    C: ConnectionTrait,
{
    let result = SubmissionMeta::delete_many()
        .filter(submission_meta::Column::Assignment.eq(assignment_id))
        .exec(db)
        .await?;
    info!(
        "Deleted {} metadata records of assignment {}",
        result.rows_affected, assignment_id
    );
    Ok(result.rows_affected)
}

/// Duplicates the record of `source_submission` onto `dest_submission`.
///
/// The copy gets a fresh id and keeps the source's assignment and values.
#[instrument(skip(db))]
pub async fn copy_to_submission<C>(
    db: &C,
    source_submission: i64,
    dest_submission: i64,
) -> Result<CopyOutcome>
where
    C: ConnectionTrait,
{
    let Some(source) = get_by_submission(db, source_submission).await? else {
        debug!("Submission {} has no metadata to copy", source_submission);
        return Ok(CopyOutcome::NothingToCopy);
    };

    let values: Vec<(Field, String)> = Field::ALL
        .into_iter()
        .filter_map(|field| source.value(field).map(|value| (field, value.to_string())))
        .collect();
    let copy = insert(db, dest_submission, source.assignment, &values).await?;
    Ok(CopyOutcome::Copied(copy))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_insert_and_get() -> Result<()> {
        let db = setup_test_db().await?;
        let record = insert(
            &db,
            10,
            1,
            &[(Field::Title, "Essay 1".to_string()), (Field::Meta2, "draft".to_string())],
        )
        .await?;

        let loaded = get_by_submission(&db, 10).await?.unwrap();
        assert_eq!(loaded, record);
        assert_eq!(loaded.value(Field::Title), Some("Essay 1"));
        assert_eq!(loaded.value(Field::Meta1), None);
        assert_eq!(loaded.value(Field::Meta2), Some("draft"));
        assert_eq!(loaded.assignment, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_get_missing_is_none() -> Result<()> {
        let db = setup_test_db().await?;
        assert!(get_by_submission(&db, 99).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_second_insert_for_same_submission_is_rejected() -> Result<()> {
        let db = setup_test_db().await?;
        insert(&db, 10, 1, &[]).await?;
        let result = insert(&db, 10, 1, &[]).await;
        assert!(matches!(result, Err(Error::Database(_))));
        Ok(())
    }

    #[tokio::test]
    async fn test_update_only_touches_given_fields() -> Result<()> {
        let db = setup_test_db().await?;
        let record = insert(
            &db,
            10,
            1,
            &[(Field::Title, "Old".to_string()), (Field::Meta1, "keep".to_string())],
        )
        .await?;

        let updated = update(&db, record.clone(), &[(Field::Title, "New".to_string())]).await?;
        assert_eq!(updated.id, record.id);
        assert_eq!(updated.value(Field::Title), Some("New"));
        assert_eq!(updated.value(Field::Meta1), Some("keep"));

        let unchanged = update(&db, updated.clone(), &[]).await?;
        assert_eq!(unchanged, updated);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_for_assignment_spares_others() -> Result<()> {
        let db = setup_test_db().await?;
        insert(&db, 10, 1, &[]).await?;
        insert(&db, 11, 1, &[]).await?;
        insert(&db, 20, 2, &[]).await?;

        assert_eq!(delete_for_assignment(&db, 1).await?, 2);
        assert!(get_by_submission(&db, 10).await?.is_none());
        assert!(get_by_submission(&db, 11).await?.is_none());
        assert!(get_by_submission(&db, 20).await?.is_some());
        Ok(())
    }

    #[tokio::test]
    async fn test_copy_to_submission() -> Result<()> {
        let db = setup_test_db().await?;
        let source = insert(&db, 10, 1, &[(Field::Meta4, "x".to_string())]).await?;

        let CopyOutcome::Copied(copy) = copy_to_submission(&db, 10, 11).await? else {
            panic!("expected a copy");
        };
        assert_ne!(copy.id, source.id);
        assert_eq!(copy.submission, 11);
        assert_eq!(copy.assignment, source.assignment);
        assert_eq!(copy.value(Field::Meta4), Some("x"));
        assert_eq!(copy.value(Field::Title), None);

        assert_eq!(copy_to_submission(&db, 42, 43).await?, CopyOutcome::NothingToCopy);
        assert!(get_by_submission(&db, 43).await?.is_none());
        Ok(())
    }
}
