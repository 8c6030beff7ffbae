//! Typed cache key builders and invalidation helpers.
//!
//! Every cached collection has a key-builder function here, and every
//! mutation goes through one of the [`invalidate`] helpers, so the set of
//! keys a write can touch is checked by the compiler instead of being
//! matched by string convention.

use crate::cache::RedisCache;
use tracing::warn;
use uuid::Uuid;

/// Prefix for all cache keys to avoid collisions with other Redis users.
const CACHE_PREFIX: &str = "lectern";

fn build_key(parts: &[&str]) -> String {
    format!("{}:{}", CACHE_PREFIX, parts.join(":"))
}

/// Cache keys for courses.
pub mod courses {
    use super::*;

    pub fn by_id(course_id: Uuid) -> String {
        build_key(&["course", &course_id.to_string()])
    }

    pub fn list() -> String {
        build_key(&["courses", "list"])
    }

    pub fn invalidation_pattern() -> String {
        format!("{}:course*", CACHE_PREFIX)
    }
}

/// Cache keys for course modules.
pub mod course_modules {
    use super::*;

    pub fn by_id(module_id: Uuid) -> String {
        build_key(&["module", &module_id.to_string()])
    }

    /// Key for one course's module list.
    pub fn by_course(course_id: Uuid) -> String {
        build_key(&["course", &course_id.to_string(), "modules"])
    }

    pub fn list() -> String {
        build_key(&["modules", "list"])
    }

    pub fn invalidation_pattern() -> String {
        format!("{}:module*", CACHE_PREFIX)
    }
}

/// Cache keys for videos.
pub mod videos {
    use super::*;

    pub fn by_id(video_id: Uuid) -> String {
        build_key(&["video", &video_id.to_string()])
    }

    /// Key for one module's video list.
    pub fn by_module(module_id: Uuid) -> String {
        build_key(&["module", &module_id.to_string(), "videos"])
    }

    pub fn list() -> String {
        build_key(&["videos", "list"])
    }

    pub fn invalidation_pattern() -> String {
        format!("{}:video*", CACHE_PREFIX)
    }
}

/// Cache keys for student profiles.
pub mod students {
    use super::*;

    pub fn by_id(profile_id: Uuid) -> String {
        build_key(&["student", &profile_id.to_string()])
    }

    pub fn list() -> String {
        build_key(&["students", "list"])
    }

    pub fn invalidation_pattern() -> String {
        format!("{}:student*", CACHE_PREFIX)
    }
}

/// Cache keys for enrollments.
pub mod enrollments {
    use super::*;

    /// Key for one student's enrolled-course list.
    pub fn by_student(profile_id: Uuid) -> String {
        build_key(&["student", &profile_id.to_string(), "enrollments"])
    }
}

/// Invalidation helpers, one per entity. Each deletes exactly the keys a
/// mutation of that entity can affect. All of them are no-ops when the
/// cache is disabled, and deleting absent keys is harmless, so calling
/// them again without an intervening mutation changes nothing.
pub mod invalidate {
    use super::*;

    async fn drop_key(cache: &RedisCache, key: &str) {
        if let Err(e) = cache.invalidate(key).await {
            warn!(cache.key = %key, error = %e, "Failed to invalidate cache key");
        }
    }

    /// Invalidate after creating, updating, or deleting a course.
    pub async fn course(cache: Option<&RedisCache>, course_id: Option<Uuid>) {
        let Some(cache) = cache else { return };

        if let Some(id) = course_id {
            drop_key(cache, &courses::by_id(id)).await;
        }
        drop_key(cache, &courses::list()).await;
    }

    /// Invalidate after a module mutation. The owning course's module
    /// list changes along with the global module library.
    pub async fn module(
        cache: Option<&RedisCache>,
        module_id: Option<Uuid>,
        course_id: Option<Uuid>,
    ) {
        let Some(cache) = cache else { return };

        if let Some(id) = module_id {
            drop_key(cache, &course_modules::by_id(id)).await;
        }
        if let Some(id) = course_id {
            drop_key(cache, &course_modules::by_course(id)).await;
        }
        drop_key(cache, &course_modules::list()).await;
    }

    /// Invalidate after a video mutation.
    pub async fn video(
        cache: Option<&RedisCache>,
        video_id: Option<Uuid>,
        module_id: Option<Uuid>,
    ) {
        let Some(cache) = cache else { return };

        if let Some(id) = video_id {
            drop_key(cache, &videos::by_id(id)).await;
        }
        if let Some(id) = module_id {
            drop_key(cache, &videos::by_module(id)).await;
        }
        drop_key(cache, &videos::list()).await;
    }

    /// Invalidate after creating, updating, or deleting a student.
    pub async fn student(cache: Option<&RedisCache>, profile_id: Option<Uuid>) {
        let Some(cache) = cache else { return };

        if let Some(id) = profile_id {
            drop_key(cache, &students::by_id(id)).await;
            drop_key(cache, &enrollments::by_student(id)).await;
        }
        drop_key(cache, &students::list()).await;
    }

    /// Invalidate after enrolling or unenrolling a student.
    pub async fn enrollment(cache: Option<&RedisCache>, profile_id: Uuid) {
        let Some(cache) = cache else { return };

        drop_key(cache, &enrollments::by_student(profile_id)).await;
    }

    /// Invalidate everything a course deletion cascades through: the
    /// course itself, its module and video lists, and every student's
    /// enrolled-course list that might have referenced it.
    pub async fn course_tree(cache: Option<&RedisCache>) {
        let Some(cache) = cache else { return };

        for pattern in [
            courses::invalidation_pattern(),
            course_modules::invalidation_pattern(),
            videos::invalidation_pattern(),
            students::invalidation_pattern(),
        ] {
            if let Err(e) = cache.invalidate_pattern(&pattern).await {
                warn!(cache.pattern = %pattern, error = %e, "Failed to invalidate cache pattern");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_generation() {
        let id = Uuid::nil();
        assert_eq!(
            courses::by_id(id),
            format!("lectern:course:{}", id)
        );
        assert_eq!(
            course_modules::by_course(id),
            format!("lectern:course:{}:modules", id)
        );
        assert_eq!(
            enrollments::by_student(id),
            format!("lectern:student:{}:enrollments", id)
        );
        assert_eq!(courses::list(), "lectern:courses:list");
    }

    #[test]
    fn test_key_building_is_deterministic() {
        let id = Uuid::new_v4();
        assert_eq!(videos::by_module(id), videos::by_module(id));
        assert_eq!(students::list(), students::list());
    }

    #[tokio::test]
    async fn test_invalidate_helpers_are_noops_without_cache() {
        // With the cache disabled every helper must return without error.
        invalidate::course(None, Some(Uuid::nil())).await;
        invalidate::module(None, None, Some(Uuid::nil())).await;
        invalidate::video(None, Some(Uuid::nil()), None).await;
        invalidate::student(None, Some(Uuid::nil())).await;
        invalidate::enrollment(None, Uuid::nil()).await;
        invalidate::course_tree(None).await;
    }
}
