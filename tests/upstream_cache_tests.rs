use async_trait::async_trait;
use course_portal::{
    TagCache,
    auth::Role,
    models::{
        Course, CourseModule, CreateCourseRequest, CreateModuleRequest, CreateVideoRequest,
        DashboardStats, UpdateCourseRequest, UserAccount, Video,
    },
    upstream::{CachedUpstream, Upstream, UpstreamError, UpstreamState},
};
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};
use uuid::Uuid;

// --- Counting Upstream Mock ---

// Records how many times each read operation actually reaches the transport,
// so the tests can tell cache hits from refetches.
#[derive(Default)]
struct CountingUpstream {
    course_fetches: AtomicUsize,
    stats_fetches: AtomicUsize,
    user_fetches: AtomicUsize,
    module_fetches: AtomicUsize,
}

#[async_trait]
impl Upstream for CountingUpstream {
    async fn list_courses(
        &self,
        category: Option<String>,
        search: Option<String>,
    ) -> Result<Vec<Course>, UpstreamError> {
        self.course_fetches.fetch_add(1, Ordering::SeqCst);
        // Echo the filters into the payload so tests can tell whose response
        // a cached read actually served.
        Ok(vec![Course {
            title: format!(
                "category={} search={}",
                category.as_deref().unwrap_or("-"),
                search.as_deref().unwrap_or("-")
            ),
            ..Course::default()
        }])
    }
    async fn featured_courses(&self) -> Result<Vec<Course>, UpstreamError> {
        self.course_fetches.fetch_add(1, Ordering::SeqCst);
        Ok(vec![])
    }
    async fn get_course(&self, _id: Uuid) -> Result<Course, UpstreamError> {
        self.course_fetches.fetch_add(1, Ordering::SeqCst);
        Ok(Course::default())
    }
    async fn create_course(&self, _req: CreateCourseRequest) -> Result<Course, UpstreamError> {
        Ok(Course::default())
    }
    async fn update_course(
        &self,
        _id: Uuid,
        _req: UpdateCourseRequest,
    ) -> Result<Course, UpstreamError> {
        Ok(Course::default())
    }
    async fn delete_course(&self, _id: Uuid) -> Result<(), UpstreamError> {
        Ok(())
    }
    async fn list_modules(&self, _course_id: Uuid) -> Result<Vec<CourseModule>, UpstreamError> {
        self.module_fetches.fetch_add(1, Ordering::SeqCst);
        Ok(vec![])
    }
    async fn create_module(
        &self,
        _course_id: Uuid,
        _req: CreateModuleRequest,
    ) -> Result<CourseModule, UpstreamError> {
        Ok(CourseModule::default())
    }
    async fn list_videos(&self, _module_id: Uuid) -> Result<Vec<Video>, UpstreamError> {
        Ok(vec![])
    }
    async fn create_video(
        &self,
        _module_id: Uuid,
        _req: CreateVideoRequest,
    ) -> Result<Video, UpstreamError> {
        Ok(Video::default())
    }
    async fn dashboard_stats(&self) -> Result<DashboardStats, UpstreamError> {
        self.stats_fetches.fetch_add(1, Ordering::SeqCst);
        Ok(DashboardStats {
            total_users: 12,
            ..DashboardStats::default()
        })
    }
    async fn list_users(&self) -> Result<Vec<UserAccount>, UpstreamError> {
        self.user_fetches.fetch_add(1, Ordering::SeqCst);
        Ok(vec![])
    }
    async fn update_user_role(
        &self,
        _id: Uuid,
        _role: Role,
    ) -> Result<UserAccount, UpstreamError> {
        Ok(UserAccount::default())
    }
    async fn delete_user(&self, _id: Uuid) -> Result<(), UpstreamError> {
        Ok(())
    }
}

fn cached() -> (Arc<CountingUpstream>, CachedUpstream) {
    let counting = Arc::new(CountingUpstream::default());
    let cache = Arc::new(TagCache::new());
    let proxy = CachedUpstream::new(counting.clone() as UpstreamState, cache);
    (counting, proxy)
}

// --- Tests ---

#[tokio::test]
async fn repeated_reads_hit_the_cache() {
    let (counting, proxy) = cached();

    let first = proxy.list_courses(None, None).await.unwrap();
    let second = proxy.list_courses(None, None).await.unwrap();

    assert_eq!(counting.course_fetches.load(Ordering::SeqCst), 1);
    assert_eq!(first[0].title, second[0].title);
}

#[tokio::test]
async fn distinct_filters_are_distinct_cache_keys() {
    let (counting, proxy) = cached();

    proxy.list_courses(None, None).await.unwrap();
    proxy
        .list_courses(Some("rust".to_string()), None)
        .await
        .unwrap();
    proxy
        .list_courses(None, Some("borrow".to_string()))
        .await
        .unwrap();

    assert_eq!(counting.course_fetches.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn crafted_filters_cannot_collide_in_cache_keys() {
    let (counting, proxy) = cached();

    // Both queries would flatten to the same string under naive
    // concatenation ("category=a&search=b&search="); they must stay
    // separate cache entries with separate payloads.
    let first = proxy
        .list_courses(Some("a&search=b".to_string()), Some(String::new()))
        .await
        .unwrap();
    let second = proxy
        .list_courses(Some("a".to_string()), Some("b&search=".to_string()))
        .await
        .unwrap();

    assert_eq!(counting.course_fetches.load(Ordering::SeqCst), 2);
    assert_ne!(
        first[0].title, second[0].title,
        "distinct queries must not share a cached payload"
    );
}

#[tokio::test]
async fn creating_a_course_invalidates_course_and_stats_reads() {
    let (counting, proxy) = cached();

    proxy.list_courses(None, None).await.unwrap();
    proxy.dashboard_stats().await.unwrap();
    proxy
        .create_course(CreateCourseRequest::default())
        .await
        .unwrap();

    // Both families refetch after the mutation.
    proxy.list_courses(None, None).await.unwrap();
    proxy.dashboard_stats().await.unwrap();

    assert_eq!(counting.course_fetches.load(Ordering::SeqCst), 2);
    assert_eq!(counting.stats_fetches.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn user_mutations_do_not_touch_course_reads() {
    let (counting, proxy) = cached();

    proxy.list_courses(None, None).await.unwrap();
    proxy.list_users().await.unwrap();

    proxy
        .update_user_role(Uuid::from_u128(9), Role::Instructor)
        .await
        .unwrap();

    proxy.list_courses(None, None).await.unwrap();
    proxy.list_users().await.unwrap();

    // Courses stayed cached; users refetched.
    assert_eq!(counting.course_fetches.load(Ordering::SeqCst), 1);
    assert_eq!(counting.user_fetches.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn deleting_a_course_also_invalidates_modules() {
    let (counting, proxy) = cached();
    let course_id = Uuid::from_u128(3);

    proxy.list_modules(course_id).await.unwrap();
    proxy.delete_course(course_id).await.unwrap();
    proxy.list_modules(course_id).await.unwrap();

    assert_eq!(counting.module_fetches.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn module_creation_leaves_stats_cached() {
    let (counting, proxy) = cached();

    proxy.dashboard_stats().await.unwrap();
    proxy
        .create_module(Uuid::from_u128(5), CreateModuleRequest::default())
        .await
        .unwrap();
    proxy.dashboard_stats().await.unwrap();

    assert_eq!(counting.stats_fetches.load(Ordering::SeqCst), 1);
}
