//! In-memory stand-in for the learning platform backend.
//!
//! Every call sleeps for a configurable latency and then answers from seeded
//! data, mirroring the stubbed network layer of the mobile client. Tests can
//! inject failures, per-call delays and an offline switch.

use std::collections::{BTreeSet, HashMap, VecDeque};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use parking_lot::Mutex;
use tracing::debug;

use super::types::{
    BookmarkToggled, MaterialQuery, MaterialsPage, ProgressUpdated, SearchFilters, SortBy,
    SortOrder,
};
use super::{ApiError, ApiResult, AuthApi, BannersApi, CategoriesApi, MaterialsApi};
use crate::config::ApiConfig;
use crate::entities::{
    Banner, BannerPriority, BannerVariant, Category, Material, MaterialType, Role, User,
};

/// One API endpoint, used to target failure and delay injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Login,
    Register,
    GetCategories,
    SearchCategories,
    GetMaterials,
    GetMaterial,
    SearchMaterials,
    GetRecentMaterials,
    GetPopularMaterials,
    GetBookmarkedMaterials,
    ToggleBookmark,
    UpdateProgress,
    IncrementViews,
    GetBanners,
    TrackImpression,
    TrackClick,
}

impl Endpoint {
    fn is_tracking(self) -> bool {
        matches!(self, Endpoint::TrackImpression | Endpoint::TrackClick)
    }
}

/// Simulated round-trip times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockLatency {
    pub default: Duration,
    pub banners: Duration,
    pub tracking: Duration,
}

impl MockLatency {
    pub fn none() -> Self {
        Self {
            default: Duration::ZERO,
            banners: Duration::ZERO,
            tracking: Duration::ZERO,
        }
    }

    fn for_endpoint(&self, endpoint: Endpoint) -> Duration {
        if endpoint.is_tracking() {
            self.tracking
        } else if endpoint == Endpoint::GetBanners {
            self.banners
        } else {
            self.default
        }
    }
}

impl From<&ApiConfig> for MockLatency {
    fn from(config: &ApiConfig) -> Self {
        Self {
            default: Duration::from_millis(config.latency_ms),
            banners: Duration::from_millis(config.banner_latency_ms),
            tracking: Duration::from_millis(config.tracking_latency_ms),
        }
    }
}

struct Account {
    user: User,
    password: String,
}

#[derive(Default)]
struct MockData {
    accounts: Vec<Account>,
    categories: Vec<Category>,
    materials: Vec<Material>,
    banners: Vec<Banner>,
}

#[derive(Default)]
struct Injection {
    offline: bool,
    failures: HashMap<Endpoint, String>,
    delays: HashMap<Endpoint, VecDeque<Duration>>,
    calls: HashMap<Endpoint, usize>,
}

/// Stubbed backend implementing every API port.
pub struct MockApi {
    latency: MockLatency,
    data: Mutex<MockData>,
    injection: Mutex<Injection>,
}

impl MockApi {
    /// Backend with no data at all.
    pub fn empty(latency: MockLatency) -> Self {
        Self {
            latency,
            data: Mutex::new(MockData::default()),
            injection: Mutex::new(Injection::default()),
        }
    }

    /// Backend preloaded with a demo account, categories, materials and the
    /// four promotional banners.
    pub fn seeded(latency: MockLatency) -> Self {
        let api = Self::empty(latency);
        let materials = seed_materials();
        let categories = seed_categories(&materials);
        {
            let mut data = api.data.lock();
            data.accounts.push(Account {
                user: User {
                    id: "u1".to_string(),
                    email: "demo@learning.app".to_string(),
                    name: "Demo User".to_string(),
                    role: Role::Admin,
                    avatar: None,
                },
                password: "password".to_string(),
            });
            data.categories = categories;
            data.materials = materials;
            data.banners = seed_banners();
        }
        api
    }

    pub fn with_categories(self, categories: Vec<Category>) -> Self {
        self.data.lock().categories = categories;
        self
    }

    pub fn with_materials(self, materials: Vec<Material>) -> Self {
        self.data.lock().materials = materials;
        self
    }

    pub fn with_banners(self, banners: Vec<Banner>) -> Self {
        self.data.lock().banners = banners;
        self
    }

    pub fn with_account(self, user: User, password: impl Into<String>) -> Self {
        self.data.lock().accounts.push(Account {
            user,
            password: password.into(),
        });
        self
    }

    /// Make every later call to `endpoint` fail with `reason`.
    pub fn fail(&self, endpoint: Endpoint, reason: impl Into<String>) {
        self.injection.lock().failures.insert(endpoint, reason.into());
    }

    pub fn clear_failures(&self) {
        self.injection.lock().failures.clear();
    }

    /// Override the latency of the next call to `endpoint`. Queued delays are
    /// consumed in call order.
    pub fn push_delay(&self, endpoint: Endpoint, delay: Duration) {
        self.injection
            .lock()
            .delays
            .entry(endpoint)
            .or_default()
            .push_back(delay);
    }

    pub fn set_offline(&self, offline: bool) {
        self.injection.lock().offline = offline;
    }

    /// Number of calls made to `endpoint` so far.
    pub fn calls(&self, endpoint: Endpoint) -> usize {
        self.injection
            .lock()
            .calls
            .get(&endpoint)
            .copied()
            .unwrap_or(0)
    }

    /// Server-side copy of a material, bypassing latency.
    pub fn material(&self, id: &str) -> Option<Material> {
        self.data.lock().materials.iter().find(|m| m.id == id).cloned()
    }

    /// Server-side copy of a banner, bypassing latency.
    pub fn banner(&self, id: &str) -> Option<Banner> {
        self.data.lock().banners.iter().find(|b| b.id == id).cloned()
    }

    /// Record the call, wait out the latency, then apply injected failures.
    async fn enter(&self, endpoint: Endpoint) -> ApiResult<()> {
        let delay = {
            let mut injection = self.injection.lock();
            *injection.calls.entry(endpoint).or_insert(0) += 1;
            injection
                .delays
                .get_mut(&endpoint)
                .and_then(VecDeque::pop_front)
                .unwrap_or_else(|| self.latency.for_endpoint(endpoint))
        };

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let injection = self.injection.lock();
        if injection.offline {
            return Err(ApiError::Unavailable("network offline".to_string()));
        }
        if let Some(reason) = injection.failures.get(&endpoint) {
            debug!(?endpoint, %reason, "Injected API failure");
            return Err(ApiError::Rejected(reason.clone()));
        }
        Ok(())
    }

    fn with_material<T>(&self, id: &str, f: impl FnOnce(&mut Material) -> T) -> ApiResult<T> {
        let mut data = self.data.lock();
        data.materials
            .iter_mut()
            .find(|m| m.id == id)
            .map(f)
            .ok_or_else(|| ApiError::NotFound {
                kind: "Material",
                id: id.to_string(),
            })
    }

    fn with_banner(&self, id: &str, f: impl FnOnce(&mut Banner)) -> ApiResult<()> {
        let mut data = self.data.lock();
        data.banners
            .iter_mut()
            .find(|b| b.id == id)
            .map(f)
            .ok_or_else(|| ApiError::NotFound {
                kind: "Banner",
                id: id.to_string(),
            })
    }
}

#[async_trait]
impl AuthApi for MockApi {
    async fn login(&self, email: &str, password: &str) -> ApiResult<User> {
        self.enter(Endpoint::Login).await?;
        let data = self.data.lock();
        data.accounts
            .iter()
            .find(|a| a.user.email.eq_ignore_ascii_case(email) && a.password == password)
            .map(|a| a.user.clone())
            .ok_or(ApiError::InvalidCredentials)
    }

    async fn register(&self, email: &str, password: &str, name: &str) -> ApiResult<User> {
        self.enter(Endpoint::Register).await?;
        let mut data = self.data.lock();
        if data
            .accounts
            .iter()
            .any(|a| a.user.email.eq_ignore_ascii_case(email))
        {
            return Err(ApiError::EmailTaken(email.to_string()));
        }
        let user = User {
            id: uuid::Uuid::new_v4().to_string(),
            email: email.to_string(),
            name: name.to_string(),
            role: Role::User,
            avatar: None,
        };
        data.accounts.push(Account {
            user: user.clone(),
            password: password.to_string(),
        });
        Ok(user)
    }
}

#[async_trait]
impl CategoriesApi for MockApi {
    async fn get_categories(&self) -> ApiResult<Vec<Category>> {
        self.enter(Endpoint::GetCategories).await?;
        Ok(self.data.lock().categories.clone())
    }

    async fn search_categories(&self, query: &str) -> ApiResult<Vec<Category>> {
        self.enter(Endpoint::SearchCategories).await?;
        let needle = query.trim().to_lowercase();
        Ok(self
            .data
            .lock()
            .categories
            .iter()
            .filter(|c| {
                c.name.to_lowercase().contains(&needle)
                    || c.description.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect())
    }
}

#[async_trait]
impl MaterialsApi for MockApi {
    async fn get_materials(&self, query: &MaterialQuery) -> ApiResult<MaterialsPage> {
        self.enter(Endpoint::GetMaterials).await?;
        let mut matching: Vec<Material> = self
            .data
            .lock()
            .materials
            .iter()
            .filter(|m| {
                query
                    .category_id
                    .as_ref()
                    .map_or(true, |category| &m.category_id == category)
            })
            .cloned()
            .collect();
        sort_materials(&mut matching, SortBy::Date, SortOrder::Desc);

        let page = query.page.max(1);
        let limit = query.limit.max(1);
        let total = matching.len();
        let start = ((page - 1) as usize).saturating_mul(limit as usize).min(total);
        let end = (start + limit as usize).min(total);
        let materials = matching[start..end].to_vec();

        Ok(MaterialsPage {
            materials,
            page,
            limit,
            total: total as u32,
            has_more: end < total,
        })
    }

    async fn get_material(&self, id: &str) -> ApiResult<Material> {
        self.enter(Endpoint::GetMaterial).await?;
        self.with_material(id, |m| m.clone())
    }

    async fn search_materials(
        &self,
        query: &str,
        filters: &SearchFilters,
    ) -> ApiResult<MaterialsPage> {
        self.enter(Endpoint::SearchMaterials).await?;
        let mut matching: Vec<Material> = self
            .data
            .lock()
            .materials
            .iter()
            .filter(|m| m.matches_query(query))
            .filter(|m| {
                filters
                    .category
                    .as_ref()
                    .map_or(true, |category| &m.category_id == category)
            })
            .filter(|m| filters.material_type.map_or(true, |t| m.material_type == t))
            .cloned()
            .collect();
        sort_materials(&mut matching, filters.sort_by, filters.sort_order);

        let total = matching.len() as u32;
        Ok(MaterialsPage {
            materials: matching,
            page: 1,
            limit: total.max(1),
            total,
            has_more: false,
        })
    }

    async fn get_recent_materials(&self, limit: u32) -> ApiResult<Vec<Material>> {
        self.enter(Endpoint::GetRecentMaterials).await?;
        let mut all = self.data.lock().materials.clone();
        sort_materials(&mut all, SortBy::Date, SortOrder::Desc);
        all.truncate(limit as usize);
        Ok(all)
    }

    async fn get_popular_materials(&self, limit: u32) -> ApiResult<Vec<Material>> {
        self.enter(Endpoint::GetPopularMaterials).await?;
        let mut all = self.data.lock().materials.clone();
        sort_materials(&mut all, SortBy::Views, SortOrder::Desc);
        all.truncate(limit as usize);
        Ok(all)
    }

    async fn get_bookmarked_materials(&self) -> ApiResult<Vec<Material>> {
        self.enter(Endpoint::GetBookmarkedMaterials).await?;
        Ok(self
            .data
            .lock()
            .materials
            .iter()
            .filter(|m| m.is_bookmarked)
            .cloned()
            .collect())
    }

    async fn toggle_bookmark(&self, id: &str) -> ApiResult<BookmarkToggled> {
        self.enter(Endpoint::ToggleBookmark).await?;
        self.with_material(id, |m| {
            m.is_bookmarked = !m.is_bookmarked;
            BookmarkToggled {
                is_bookmarked: m.is_bookmarked,
            }
        })
    }

    async fn update_progress(&self, id: &str, progress: u8) -> ApiResult<ProgressUpdated> {
        self.enter(Endpoint::UpdateProgress).await?;
        self.with_material(id, |m| {
            m.progress = progress.min(100);
            ProgressUpdated {
                progress: m.progress,
            }
        })
    }

    async fn increment_views(&self, id: &str) -> ApiResult<()> {
        self.enter(Endpoint::IncrementViews).await?;
        self.with_material(id, |m| m.views += 1)
    }
}

#[async_trait]
impl BannersApi for MockApi {
    async fn get_banners(&self) -> ApiResult<Vec<Banner>> {
        self.enter(Endpoint::GetBanners).await?;
        Ok(self.data.lock().banners.clone())
    }

    async fn track_impression(&self, id: &str) -> ApiResult<()> {
        self.enter(Endpoint::TrackImpression).await?;
        self.with_banner(id, |b| b.impression_count += 1)
    }

    async fn track_click(&self, id: &str) -> ApiResult<()> {
        self.enter(Endpoint::TrackClick).await?;
        self.with_banner(id, |b| b.click_count += 1)
    }
}

fn sort_materials(materials: &mut [Material], sort_by: SortBy, order: SortOrder) {
    materials.sort_by(|a, b| {
        let ordering = match sort_by {
            SortBy::Date => a.created_at.cmp(&b.created_at),
            SortBy::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
            SortBy::Views => a.views.cmp(&b.views),
            SortBy::Downloads => a.downloads.cmp(&b.downloads),
        };
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

const SEED_CATEGORIES: [(&str, &str, &str, &str, &str); 6] = [
    ("safety", "Railway Safety", "Rules and procedures for safe operation", "shield-checkmark", "#059669"),
    ("locomotive", "Locomotive Operation", "Driving and servicing traction units", "train", "#2563eb"),
    ("signalling", "Signalling Systems", "Signals, interlocking and dispatching", "git-network", "#d97706"),
    ("track", "Track Maintenance", "Inspection and repair of the permanent way", "construct", "#7c3aed"),
    ("regulations", "Regulations", "Normative documents and instructions", "document-text", "#dc2626"),
    ("electrical", "Electrical Systems", "Catenary, substations and power supply", "flash", "#0ea5e9"),
];

const SEED_MATERIAL_COUNT: u64 = 48;

fn seed_materials() -> Vec<Material> {
    let now = Utc::now();
    let types = [
        MaterialType::Pdf,
        MaterialType::Ppt,
        MaterialType::Doc,
        MaterialType::Video,
        MaterialType::Image,
    ];
    (1..=SEED_MATERIAL_COUNT)
        .map(|n| {
            let (slug, name, ..) = SEED_CATEGORIES[(n as usize) % SEED_CATEGORIES.len()];
            let material_type = types[(n as usize) % types.len()];
            let created_at = now - ChronoDuration::days(n as i64);
            let tags: BTreeSet<String> = [slug.to_string(), material_type.to_string()]
                .into_iter()
                .collect();
            Material {
                id: format!("m{n}"),
                title: format!("{name} lesson {n}"),
                description: format!("Study material {n} for the {name} course"),
                category_id: slug.to_string(),
                material_type,
                file_url: format!("https://files.learning.app/materials/m{n}.{material_type}"),
                thumbnail_url: None,
                size: 250_000 + n * 17_500,
                created_at,
                updated_at: created_at,
                tags,
                is_bookmarked: n % 7 == 0,
                progress: 0,
                views: (n * 37) % 500,
                downloads: (n * 11) % 120,
            }
        })
        .collect()
}

fn seed_categories(materials: &[Material]) -> Vec<Category> {
    SEED_CATEGORIES
        .iter()
        .map(|(slug, name, description, icon, color)| Category {
            id: slug.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            icon: icon.to_string(),
            count: materials.iter().filter(|m| m.category_id == *slug).count() as u32,
            color: color.to_string(),
            path: format!("/categories/{slug}"),
        })
        .collect()
}

fn seed_banners() -> Vec<Banner> {
    let now = Utc::now();
    let banner = |id: &str, title: &str, subtitle: &str, description: &str| Banner {
        id: id.to_string(),
        title: title.to_string(),
        subtitle: Some(subtitle.to_string()),
        description: Some(description.to_string()),
        image_url: None,
        gradient_colors: Vec::new(),
        button_text: None,
        button_icon: None,
        variant: BannerVariant::Gradient,
        priority: BannerPriority::Medium,
        is_active: true,
        start_date: None,
        end_date: None,
        target_audience: Vec::new(),
        click_count: 0,
        impression_count: 0,
        created_at: now,
        updated_at: now,
    };

    vec![
        Banner {
            gradient_colors: vec!["#059669".into(), "#10b981".into()],
            button_text: Some("Kursga yozilish".into()),
            button_icon: Some("arrow-forward".into()),
            priority: BannerPriority::High,
            ..banner(
                "1",
                "Yangi Kurs: Temir Yo'l Xavfsizligi",
                "Yangilik",
                "Temir yo'l xavfsizligi bo'yicha yangi onlayn kurs mavjud. Hoziroq ro'yxatdan o'ting!",
            )
        },
        Banner {
            variant: BannerVariant::Announcement,
            button_text: Some("Batafsil".into()),
            button_icon: Some("information-circle".into()),
            ..banner(
                "2",
                "Texnik Xizmat Ko'rsatish",
                "E'lon",
                "Tizim texnik xizmat ko'rsatish uchun 15:00-16:00 oralig'ida ishlamaydi.",
            )
        },
        Banner {
            gradient_colors: vec!["#7c3aed".into(), "#a855f7".into()],
            button_text: Some("Ko'rish".into()),
            button_icon: Some("eye".into()),
            ..banner(
                "3",
                "Yangi Materiallar Qo'shildi",
                "Yangilik",
                "Lokomotiv boshqaruvi bo'yicha 50+ yangi material qo'shildi.",
            )
        },
        Banner {
            gradient_colors: vec!["#2563eb".into(), "#3b82f6".into()],
            button_text: Some("Yangiliklar".into()),
            button_icon: Some("sparkles".into()),
            priority: BannerPriority::Low,
            ..banner(
                "4",
                "Mobil Ilova Yangilandi",
                "Yangilik",
                "Yangi funksiyalar va yaxshilanishlar bilan tanishing.",
            )
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api() -> MockApi {
        MockApi::seeded(MockLatency::none())
    }

    #[tokio::test]
    async fn pages_cover_all_materials_without_overlap() {
        let api = api();
        let first = api.get_materials(&MaterialQuery::first_page(20)).await.unwrap();
        assert_eq!(first.materials.len(), 20);
        assert!(first.has_more);
        assert_eq!(first.total, SEED_MATERIAL_COUNT as u32);

        let third = api
            .get_materials(&MaterialQuery {
                category_id: None,
                page: 3,
                limit: 20,
            })
            .await
            .unwrap();
        assert_eq!(third.materials.len(), 8);
        assert!(!third.has_more);
    }

    #[tokio::test]
    async fn category_filter_limits_results() {
        let api = api();
        let page = api
            .get_materials(&MaterialQuery::first_page(100).in_category("safety"))
            .await
            .unwrap();
        assert!(!page.materials.is_empty());
        assert!(page.materials.iter().all(|m| m.category_id == "safety"));
    }

    #[tokio::test]
    async fn login_rejects_wrong_password() {
        let api = api();
        let err = api.login("demo@learning.app", "nope").await.unwrap_err();
        assert_eq!(err, ApiError::InvalidCredentials);
        assert_eq!(err.to_string(), "Invalid credentials");
    }

    #[tokio::test]
    async fn register_then_login() {
        let api = api();
        let user = api.register("new@learning.app", "secret1", "New").await.unwrap();
        assert_eq!(user.role, Role::User);
        let again = api.login("NEW@learning.app", "secret1").await.unwrap();
        assert_eq!(again.id, user.id);
        assert!(matches!(
            api.register("new@learning.app", "x", "y").await,
            Err(ApiError::EmailTaken(_))
        ));
    }

    #[tokio::test]
    async fn toggle_bookmark_is_server_authoritative() {
        let api = api();
        let before = api.material("m1").unwrap().is_bookmarked;
        let toggled = api.toggle_bookmark("m1").await.unwrap();
        assert_eq!(toggled.is_bookmarked, !before);
        assert_eq!(api.material("m1").unwrap().is_bookmarked, !before);
    }

    #[tokio::test]
    async fn injected_failure_and_offline() {
        let api = api();
        api.fail(Endpoint::GetCategories, "boom");
        assert_eq!(
            api.get_categories().await.unwrap_err(),
            ApiError::Rejected("boom".into())
        );
        api.clear_failures();
        assert!(api.get_categories().await.is_ok());

        api.set_offline(true);
        assert!(matches!(
            api.get_banners().await,
            Err(ApiError::Unavailable(_))
        ));
        assert_eq!(api.calls(Endpoint::GetCategories), 2);
    }

    #[tokio::test]
    async fn search_sorts_by_title_ascending() {
        let api = api();
        let filters = SearchFilters {
            sort_by: SortBy::Title,
            sort_order: SortOrder::Asc,
            ..SearchFilters::default()
        };
        let page = api.search_materials("lesson", &filters).await.unwrap();
        let titles: Vec<String> = page.materials.iter().map(|m| m.title.to_lowercase()).collect();
        let mut sorted = titles.clone();
        sorted.sort();
        assert_eq!(titles, sorted);
        assert!(!page.has_more);
    }

    #[test]
    fn seeded_banners_are_all_active() {
        let now = Utc::now();
        let banners = seed_banners();
        assert_eq!(banners.len(), 4);
        assert!(banners.iter().all(|b| b.is_active_at(now)));
    }
}
