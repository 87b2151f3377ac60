//! Administrative listing and (de)activation of warnings and exclusions.

use db::filters::EscalationFilter;
use db::models::{exclusion::Model as ExclusionModel, warning::Model as WarningModel};
use sea_orm::ConnectionTrait;
use tracing::info;

use crate::error::{AppError, AppResult, is_unique_violation};

pub async fn list_warnings<C>(db: &C, filter: &EscalationFilter) -> AppResult<Vec<WarningModel>>
where
    C: ConnectionTrait,
{
    Ok(WarningModel::list(db, filter).await?)
}

pub async fn list_exclusions<C>(db: &C, filter: &EscalationFilter) -> AppResult<Vec<ExclusionModel>>
where
    C: ConnectionTrait,
{
    Ok(ExclusionModel::list(db, filter).await?)
}

/// Reactivating a warning while another one is active for the same pair is a
/// conflict.
pub async fn set_warning_active<C>(db: &C, id: i64, is_active: bool) -> AppResult<WarningModel>
where
    C: ConnectionTrait,
{
    let updated = WarningModel::set_active(db, id, is_active)
        .await
        .map_err(|e| reactivation_error(e, "Student already has an active warning in this course"))?
        .ok_or_else(|| AppError::not_found("Warning not found"))?;
    info!(warning_id = id, is_active, "warning updated");
    Ok(updated)
}

pub async fn set_exclusion_active<C>(db: &C, id: i64, is_active: bool) -> AppResult<ExclusionModel>
where
    C: ConnectionTrait,
{
    let updated = ExclusionModel::set_active(db, id, is_active)
        .await
        .map_err(|e| reactivation_error(e, "Student already has an active exclusion in this course"))?
        .ok_or_else(|| AppError::not_found("Exclusion not found"))?;
    info!(exclusion_id = id, is_active, "exclusion updated");
    Ok(updated)
}

fn reactivation_error(e: sea_orm::DbErr, msg: &str) -> AppError {
    if is_unique_violation(&e) {
        AppError::conflict(msg)
    } else {
        AppError::from(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::fixture;

    #[tokio::test]
    async fn lifting_an_exclusion_reopens_check_ins_for_the_pair() {
        let f = fixture().await;
        let e = ExclusionModel::issue(&f.db, f.student.id, f.course.id, 3, "three")
            .await
            .unwrap();

        let lifted = set_exclusion_active(&f.db, e.id, false).await.unwrap();
        assert!(!lifted.is_active);
        assert!(
            ExclusionModel::active_for(&f.db, f.student.id, f.course.id)
                .await
                .unwrap()
                .is_none()
        );

        let active = list_exclusions(&f.db, &EscalationFilter::new().active_only())
            .await
            .unwrap();
        assert!(active.is_empty());
        let all = list_exclusions(&f.db, &EscalationFilter::new().with_course(f.course.id))
            .await
            .unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn reactivating_a_second_warning_conflicts() {
        let f = fixture().await;
        let old = WarningModel::issue(&f.db, f.student.id, f.course.id, 2, "old")
            .await
            .unwrap();
        set_warning_active(&f.db, old.id, false).await.unwrap();
        WarningModel::issue(&f.db, f.student.id, f.course.id, 3, "new")
            .await
            .unwrap();

        let err = set_warning_active(&f.db, old.id, true).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)), "{err:?}");
        assert_eq!(list_warnings(&f.db, &EscalationFilter::new()).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn unknown_ids_are_not_found() {
        let f = fixture().await;
        assert!(matches!(
            set_warning_active(&f.db, 5, false).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            set_exclusion_active(&f.db, 5, false).await,
            Err(AppError::NotFound(_))
        ));
    }
}
