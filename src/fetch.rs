//! Concurrent multi-query reads and the decision policies applied to their
//! results before a view is chosen.

use std::future::Future;

use crate::error::{AppError, AppResult};
use crate::store::StoreError;

/// Issue two independent store queries at once and suspend until both have
/// finished, success or failure. A failed query surfaces as the whole
/// operation's error, first one wins, but never cancels the other
/// mid-flight.
pub async fn join2<A, B>(
    a: impl Future<Output = Result<A, StoreError>>,
    b: impl Future<Output = Result<B, StoreError>>,
) -> AppResult<(A, B)> {
    let (a, b) = futures::join!(a, b);
    Ok((a?, b?))
}

/// Detail-view policy: a missing primary entity is a 404, with no partial
/// render.
pub fn require_found<T>(primary: Option<T>) -> AppResult<T> {
    primary.ok_or(AppError::NotFound)
}

/// Outcome of the delete-flow aggregate fetch.
#[derive(Debug)]
pub enum DeleteFetch<P, D> {
    /// Primary already gone; the handler redirects and must stop there.
    Missing,
    /// Live dependents forbid the delete; both come back so the view can
    /// explain what is in the way.
    Blocked { primary: P, dependents: Vec<D> },
    /// No dependents; the delete may proceed.
    Clear { primary: P },
}

/// Delete-view policy. Unlike detail views, a missing primary is not an
/// error here: the record is treated as already deleted.
pub fn delete_policy<P, D>(primary: Option<P>, dependents: Vec<D>) -> DeleteFetch<P, D> {
    match primary {
        None => DeleteFetch::Missing,
        Some(primary) if !dependents.is_empty() => DeleteFetch::Blocked {
            primary,
            dependents,
        },
        Some(primary) => DeleteFetch::Clear { primary },
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use super::*;

    #[tokio::test]
    async fn join2_returns_both_results() {
        let result = join2(
            async { Ok::<_, StoreError>(1) },
            async { Ok::<_, StoreError>("two") },
        )
        .await
        .unwrap();
        assert_eq!(result, (1, "two"));
    }

    #[tokio::test]
    async fn join2_drives_the_second_query_to_completion_after_a_failure() {
        let second_ran = AtomicBool::new(false);
        let result = join2(
            async { Err::<i32, _>(StoreError::Unavailable("down".to_string())) },
            async {
                tokio::task::yield_now().await;
                second_ran.store(true, Ordering::SeqCst);
                Ok::<_, StoreError>(7)
            },
        )
        .await;

        assert!(matches!(
            result,
            Err(AppError::Store(StoreError::Unavailable(_)))
        ));
        assert!(second_ran.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn join2_surfaces_the_first_error_when_both_fail() {
        let result = join2(
            async { Err::<i32, _>(StoreError::Unavailable("first".to_string())) },
            async { Err::<i32, _>(StoreError::Unavailable("second".to_string())) },
        )
        .await;

        match result {
            Err(AppError::Store(StoreError::Unavailable(message))) => {
                assert_eq!(message, "first");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn require_found_maps_absence_to_not_found() {
        assert!(matches!(require_found::<i32>(None), Err(AppError::NotFound)));
        assert_eq!(require_found(Some(3)).unwrap(), 3);
    }

    #[test]
    fn delete_policy_branches_on_presence_and_dependents() {
        assert!(matches!(
            delete_policy::<i32, i32>(None, vec![1]),
            DeleteFetch::Missing
        ));
        assert!(matches!(
            delete_policy(Some(1), vec![2, 3]),
            DeleteFetch::Blocked { dependents, .. } if dependents.len() == 2
        ));
        assert!(matches!(
            delete_policy::<i32, i32>(Some(1), Vec::new()),
            DeleteFetch::Clear { primary: 1 }
        ));
    }
}
