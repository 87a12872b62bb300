#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use core_seed_sdk::{
        BasicQueries, Currency, GeoCommands, GeoCountry, GeoQueries, GeoZone, Language,
        SiteCommands, SiteId, SiteQueries, SiteRole, SiteSettings, SiteUser, StoreError,
        TenantId, UserCommands, UserQueries, UserRole,
    };
    use parking_lot::Mutex;
    use time::OffsetDateTime;
    use uuid::Uuid;

    use crate::domain::error::SeedError;
    use crate::domain::initial_data::{
        ADMINISTRATORS_ROLE, AUTHENTICATED_USERS_ROLE, DEFAULT_ROLE_NAMES, InitialData,
    };
    use crate::domain::reference::{COUNTRIES, CURRENCIES, LANGUAGES, ZONES};
    use crate::domain::seeder::{SeedReport, SeedRunner, SeedStores};
    use crate::infra::tenant::{FirstSiteTenantResolver, StaticTenantResolver};

    #[derive(Default)]
    struct State {
        countries: Vec<GeoCountry>,
        zones: Vec<GeoZone>,
        languages: Vec<Language>,
        currencies: Vec<Currency>,
        sites: Vec<SiteSettings>,
        roles: Vec<SiteRole>,
        users: Vec<SiteUser>,
        memberships: Vec<UserRole>,
        calls: Vec<&'static str>,
    }

    // In-memory store that records every call and can be told to fail one of them
    #[derive(Default)]
    struct MockStore {
        state: Mutex<State>,
        fail_on: Option<&'static str>,
        hide_sites: bool,
    }

    impl MockStore {
        fn failing_on(op: &'static str) -> Self {
            Self {
                fail_on: Some(op),
                ..Self::default()
            }
        }

        fn record(&self, op: &'static str) -> Result<(), StoreError> {
            self.state.lock().calls.push(op);
            if self.fail_on == Some(op) {
                return Err(StoreError::conflict(format!("{op} failed")));
            }
            Ok(())
        }

        fn calls(&self) -> Vec<&'static str> {
            self.state.lock().calls.clone()
        }

        fn with_site(self) -> (Self, SiteSettings) {
            let site = SiteSettings {
                id: Uuid::new_v4(),
                alias_id: "existing".to_owned(),
                site_name: "Existing".to_owned(),
                theme: String::new(),
                is_server_admin_site: true,
                created_utc: OffsetDateTime::now_utc(),
            };
            self.state.lock().sites.push(site.clone());
            (self, site)
        }

        fn with_roles(self, site_id: SiteId, names: &[&str]) -> Self {
            {
                let mut state = self.state.lock();
                for name in names {
                    state.roles.push(SiteRole {
                        id: Uuid::new_v4(),
                        site_id,
                        role_name: (*name).to_owned(),
                        normalized_role_name: name.to_uppercase(),
                    });
                }
            }
            self
        }
    }

    #[async_trait]
    impl GeoQueries for MockStore {
        async fn country_count(&self) -> Result<u64, StoreError> {
            self.record("country_count")?;
            Ok(self.state.lock().countries.len() as u64)
        }

        async fn language_count(&self) -> Result<u64, StoreError> {
            self.record("language_count")?;
            Ok(self.state.lock().languages.len() as u64)
        }

        async fn all_currencies(&self) -> Result<Vec<Currency>, StoreError> {
            self.record("all_currencies")?;
            Ok(self.state.lock().currencies.clone())
        }
    }

    #[async_trait]
    impl GeoCommands for MockStore {
        async fn add_country(&self, country: &GeoCountry) -> Result<(), StoreError> {
            self.record("add_country")?;
            self.state.lock().countries.push(country.clone());
            Ok(())
        }

        async fn add_zone(&self, zone: &GeoZone) -> Result<(), StoreError> {
            self.record("add_zone")?;
            self.state.lock().zones.push(zone.clone());
            Ok(())
        }

        async fn add_language(&self, language: &Language) -> Result<(), StoreError> {
            self.record("add_language")?;
            self.state.lock().languages.push(language.clone());
            Ok(())
        }

        async fn add_currency(&self, currency: &Currency) -> Result<(), StoreError> {
            self.record("add_currency")?;
            self.state.lock().currencies.push(currency.clone());
            Ok(())
        }
    }

    #[async_trait]
    impl SiteQueries for MockStore {
        async fn count(&self) -> Result<u64, StoreError> {
            self.record("site_count")?;
            Ok(self.state.lock().sites.len() as u64)
        }

        async fn fetch_first(&self) -> Result<Option<SiteSettings>, StoreError> {
            self.record("fetch_first_site")?;
            if self.hide_sites {
                return Ok(None);
            }
            Ok(self.state.lock().sites.first().cloned())
        }
    }

    #[async_trait]
    impl SiteCommands for MockStore {
        async fn create(&self, site: &SiteSettings) -> Result<SiteSettings, StoreError> {
            self.record("create_site")?;
            self.state.lock().sites.push(site.clone());
            Ok(site.clone())
        }
    }

    #[async_trait]
    impl UserQueries for MockStore {
        async fn fetch_role(
            &self,
            site_id: SiteId,
            role_name: &str,
        ) -> Result<Option<SiteRole>, StoreError> {
            self.record("fetch_role")?;
            Ok(self
                .state
                .lock()
                .roles
                .iter()
                .find(|r| r.site_id == site_id && r.matches_name(role_name))
                .cloned())
        }

        async fn roles_for_user(
            &self,
            site_id: SiteId,
            user_id: Uuid,
        ) -> Result<Vec<SiteRole>, StoreError> {
            let state = self.state.lock();
            Ok(state
                .roles
                .iter()
                .filter(|r| {
                    state.memberships.iter().any(|m| {
                        m.site_id == site_id && m.user_id == user_id && m.role_id == r.id
                    })
                })
                .cloned()
                .collect())
        }
    }

    #[async_trait]
    impl UserCommands for MockStore {
        async fn create_role(&self, role: &SiteRole) -> Result<SiteRole, StoreError> {
            self.record("create_role")?;
            self.state.lock().roles.push(role.clone());
            Ok(role.clone())
        }

        async fn create_user(&self, user: &SiteUser) -> Result<SiteUser, StoreError> {
            self.record("create_user")?;
            self.state.lock().users.push(user.clone());
            Ok(user.clone())
        }

        async fn add_user_to_role(
            &self,
            site_id: SiteId,
            role_id: Uuid,
            user_id: Uuid,
        ) -> Result<(), StoreError> {
            self.record("add_user_to_role")?;
            self.state.lock().memberships.push(UserRole {
                site_id,
                user_id,
                role_id,
            });
            Ok(())
        }
    }

    #[async_trait]
    impl BasicQueries<SiteRole> for MockStore {
        async fn count_by_tenant(&self, tenant_id: TenantId) -> Result<u64, StoreError> {
            self.record("role_count")?;
            let state = self.state.lock();
            Ok(state.roles.iter().filter(|r| r.site_id == tenant_id).count() as u64)
        }
    }

    #[async_trait]
    impl BasicQueries<SiteUser> for MockStore {
        async fn count_by_tenant(&self, tenant_id: TenantId) -> Result<u64, StoreError> {
            self.record("user_count")?;
            let state = self.state.lock();
            Ok(state.users.iter().filter(|u| u.site_id == tenant_id).count() as u64)
        }
    }

    fn runner(store: &Arc<MockStore>) -> SeedRunner {
        let resolver = Arc::new(FirstSiteTenantResolver::new(store.clone()));
        SeedRunner::new(
            SeedStores::from_store(store, resolver),
            InitialData::default(),
        )
    }

    fn static_runner(store: &Arc<MockStore>, tenant_id: TenantId) -> SeedRunner {
        let resolver = Arc::new(StaticTenantResolver::new(tenant_id));
        SeedRunner::new(
            SeedStores::from_store(store, resolver),
            InitialData::default().with_site_id(tenant_id),
        )
    }

    #[tokio::test]
    async fn empty_store_is_fully_seeded() {
        let store = Arc::new(MockStore::default());

        let report = runner(&store).run().await.unwrap();

        assert_eq!(report.countries_added, COUNTRIES.len());
        assert_eq!(report.zones_added, ZONES.len());
        assert_eq!(report.languages_added, LANGUAGES.len());
        assert_eq!(report.currencies_added, CURRENCIES.len());
        assert_eq!(report.roles_created, 4);
        assert_eq!(report.memberships_added, 2);

        let state = store.state.lock();
        assert_eq!(state.sites.len(), 1);
        let site_id = state.sites[0].id;
        assert_eq!(report.site_created, Some(site_id));

        let role_names: Vec<_> = state.roles.iter().map(|r| r.role_name.as_str()).collect();
        assert_eq!(role_names, DEFAULT_ROLE_NAMES);
        assert!(state.roles.iter().all(|r| r.site_id == site_id));

        assert_eq!(state.users.len(), 1);
        let admin = &state.users[0];
        assert_eq!(report.admin_created, Some(admin.id));
        assert_eq!(admin.site_id, site_id);

        let admin_roles: Vec<_> = state
            .memberships
            .iter()
            .filter(|m| m.user_id == admin.id)
            .map(|m| {
                state
                    .roles
                    .iter()
                    .find(|r| r.id == m.role_id)
                    .unwrap()
                    .role_name
                    .as_str()
            })
            .collect();
        assert_eq!(admin_roles, [ADMINISTRATORS_ROLE, AUTHENTICATED_USERS_ROLE]);
    }

    #[tokio::test]
    async fn steps_run_in_dependency_order() {
        let store = Arc::new(MockStore::default());

        runner(&store).run().await.unwrap();

        let calls = store.calls();
        let first = |op: &str| calls.iter().position(|c| *c == op).unwrap();
        let last = |op: &str| calls.iter().rposition(|c| *c == op).unwrap();

        assert!(last("add_country") < first("add_zone"));
        assert!(last("add_zone") < first("language_count"));
        assert!(first("create_site") < first("create_role"));
        assert!(last("create_role") < first("create_user"));
        assert!(first("create_user") < first("add_user_to_role"));
    }

    #[tokio::test]
    async fn second_run_inserts_nothing() {
        let store = Arc::new(MockStore::default());
        let runner = runner(&store);

        let first = runner.run().await.unwrap();
        assert!(!first.is_noop());

        let second = runner.run().await.unwrap();
        assert!(second.is_noop());
        assert_eq!(second, SeedReport::default());

        let state = store.state.lock();
        assert_eq!(state.countries.len(), COUNTRIES.len());
        assert_eq!(state.zones.len(), ZONES.len());
        assert_eq!(state.languages.len(), LANGUAGES.len());
        assert_eq!(state.currencies.len(), CURRENCIES.len());
        assert_eq!(state.sites.len(), 1);
        assert_eq!(state.roles.len(), 4);
        assert_eq!(state.users.len(), 1);
        assert_eq!(state.memberships.len(), 2);
    }

    #[tokio::test]
    async fn reference_data_present_skips_geography_only() {
        let store = Arc::new(MockStore::default());
        {
            let data = InitialData::default();
            let mut state = store.state.lock();
            state.countries.push(data.countries().remove(0));
            state.languages.push(data.languages().remove(0));
            state.currencies.push(data.currencies().remove(0));
        }

        let report = runner(&store).run().await.unwrap();

        assert_eq!(report.countries_added, 0);
        assert_eq!(report.zones_added, 0);
        assert_eq!(report.languages_added, 0);
        assert_eq!(report.currencies_added, 0);
        assert!(report.site_created.is_some());
        assert_eq!(report.roles_created, 4);
        assert!(report.admin_created.is_some());

        let calls = store.calls();
        assert!(!calls.contains(&"add_country"));
        assert!(!calls.contains(&"add_zone"));
        assert!(!calls.contains(&"add_language"));
        assert!(!calls.contains(&"add_currency"));
    }

    #[tokio::test]
    async fn each_reference_category_is_guarded_independently() {
        let store = Arc::new(MockStore::default());
        store
            .state
            .lock()
            .languages
            .push(InitialData::default().languages().remove(0));

        let report = runner(&store).run().await.unwrap();

        assert_eq!(report.countries_added, COUNTRIES.len());
        assert_eq!(report.languages_added, 0);
        assert_eq!(report.currencies_added, CURRENCIES.len());
        assert_eq!(store.state.lock().languages.len(), 1);
    }

    #[tokio::test]
    async fn existing_site_without_roles_gets_roles_and_admin() {
        let (store, site) = MockStore::default().with_site();
        let store = Arc::new(store);

        let report = runner(&store).run().await.unwrap();

        assert_eq!(report.site_created, None);
        assert_eq!(report.roles_created, 4);
        assert!(report.admin_created.is_some());

        let state = store.state.lock();
        assert_eq!(state.sites.len(), 1);
        assert!(state.roles.iter().all(|r| r.site_id == site.id));
        assert_eq!(state.users[0].site_id, site.id);
        assert!(state.calls.contains(&"fetch_first_site"));
    }

    #[tokio::test]
    async fn missing_site_fails_before_roles_are_written() {
        let (store, _site) = MockStore::default().with_site();
        let store = Arc::new(MockStore {
            hide_sites: true,
            ..store
        });

        let result = runner(&store).run().await;

        assert!(matches!(result, Err(SeedError::NoActiveSite)));
        let state = store.state.lock();
        assert!(state.roles.is_empty());
        assert!(state.users.is_empty());
    }

    #[tokio::test]
    async fn static_tenant_second_run_inserts_nothing() {
        let store = Arc::new(MockStore::default());
        let tenant_id = Uuid::new_v4();
        let runner = static_runner(&store, tenant_id);

        let first = runner.run().await.unwrap();
        assert_eq!(first.site_created, Some(tenant_id));
        assert_eq!(first.roles_created, 4);
        assert!(first.admin_created.is_some());

        let second = runner.run().await.unwrap();
        assert!(second.is_noop());

        let state = store.state.lock();
        assert_eq!(state.roles.len(), 4);
        assert!(state.roles.iter().all(|r| r.site_id == tenant_id));
        assert_eq!(state.users.len(), 1);
    }

    #[tokio::test]
    async fn tenant_other_than_existing_site_fails_before_roles_are_written() {
        let (store, site) = MockStore::default().with_site();
        let store = Arc::new(store);
        let tenant_id = Uuid::new_v4();

        let result = static_runner(&store, tenant_id).run().await;

        match result {
            Err(SeedError::TenantMismatch {
                tenant_id: tenant,
                site_id,
            }) => {
                assert_eq!(tenant, tenant_id);
                assert_eq!(site_id, site.id);
            }
            other => panic!("expected tenant mismatch, got {other:?}"),
        }
        let state = store.state.lock();
        assert!(state.roles.is_empty());
        assert!(state.users.is_empty());
    }

    #[tokio::test]
    #[tracing_test::traced_test]
    async fn missing_administrators_role_skips_admin_silently() {
        let (store, site) = MockStore::default().with_site();
        let store = Arc::new(store.with_roles(site.id, &[AUTHENTICATED_USERS_ROLE]));

        let report = runner(&store).run().await.unwrap();

        assert_eq!(report.roles_created, 0);
        assert_eq!(report.admin_created, None);
        assert_eq!(report.memberships_added, 0);
        assert!(store.state.lock().users.is_empty());
        assert!(!store.calls().contains(&"create_user"));
        assert!(logs_contain("administrator not created"));
    }

    #[tokio::test]
    async fn missing_authenticated_role_skips_only_that_membership() {
        let (store, site) = MockStore::default().with_site();
        let store = Arc::new(store.with_roles(site.id, &[ADMINISTRATORS_ROLE]));

        let report = runner(&store).run().await.unwrap();

        assert!(report.admin_created.is_some());
        assert_eq!(report.memberships_added, 1);

        let state = store.state.lock();
        assert_eq!(state.users.len(), 1);
        assert_eq!(state.memberships.len(), 1);
        assert_eq!(state.memberships[0].role_id, state.roles[0].id);
    }

    #[tokio::test]
    async fn existing_users_skip_admin_creation() {
        let (store, site) = MockStore::default().with_site();
        let store = Arc::new(store.with_roles(site.id, &DEFAULT_ROLE_NAMES));
        let existing = InitialData::default().initial_admin(site.id).unwrap();
        store.state.lock().users.push(existing);

        let report = runner(&store).run().await.unwrap();

        assert_eq!(report.admin_created, None);
        assert!(!store.calls().contains(&"fetch_role"));
        assert_eq!(store.state.lock().users.len(), 1);
    }

    #[tokio::test]
    async fn store_failure_aborts_remaining_steps() {
        let store = Arc::new(MockStore::failing_on("add_language"));

        let result = runner(&store).run().await;

        let err = result.unwrap_err();
        assert!(matches!(err, SeedError::Store(StoreError::Conflict(_))));
        assert_eq!(err.to_string(), "conflict: add_language failed");

        let calls = store.calls();
        assert_eq!(calls.iter().filter(|c| **c == "add_language").count(), 1);
        assert!(!calls.contains(&"all_currencies"));
        assert!(!calls.contains(&"create_site"));
        assert_eq!(store.state.lock().countries.len(), COUNTRIES.len());
    }

    #[tokio::test]
    async fn role_creation_failure_leaves_site_in_place() {
        let store = Arc::new(MockStore::failing_on("create_role"));

        let result = runner(&store).run().await;
        assert!(matches!(result, Err(SeedError::Store(_))));

        let state = store.state.lock();
        assert_eq!(state.sites.len(), 1);
        assert!(state.roles.is_empty());
        assert!(state.users.is_empty());
    }

    #[tokio::test]
    async fn rerun_after_crash_recovers_roles_for_existing_site() {
        let crashed = Arc::new(MockStore::failing_on("create_role"));
        assert!(runner(&crashed).run().await.is_err());

        let site = crashed.state.lock().sites[0].clone();
        let recovered = Arc::new(MockStore::default());
        recovered.state.lock().sites.push(site.clone());

        let report = runner(&recovered).run().await.unwrap();

        assert_eq!(report.site_created, None);
        assert_eq!(report.roles_created, 4);
        assert!(recovered
            .state
            .lock()
            .roles
            .iter()
            .all(|r| r.site_id == site.id));
    }
}
