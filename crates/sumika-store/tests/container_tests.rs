use sumika_core::{Container, ContainerStore, PaginationOptions, StoreError};
use sumika_store::MemoryContainerStore;

#[cfg(test)]
mod tests {
    use super::*;

    async fn create_test_store() -> MemoryContainerStore {
        let store = MemoryContainerStore::new();
        store.bootstrap_root("root").await.unwrap();
        store
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let store = create_test_store().await;
        let container = Container::new("albums", Some("root".to_string()))
            .with_title("Albums")
            .with_description("Photo albums");

        let created = store.create(container.clone()).await.unwrap();
        assert_eq!(created, container);

        let fetched = store.get("albums").await.unwrap();
        assert_eq!(fetched.title.as_deref(), Some("Albums"));
        assert_eq!(fetched.parent_id.as_deref(), Some("root"));
        assert_eq!(fetched.member_count(), 0);
    }

    #[tokio::test]
    async fn test_create_duplicate() {
        let store = create_test_store().await;
        store
            .create(Container::new("albums", Some("root".to_string())))
            .await
            .unwrap();

        let err = store
            .create(Container::new("albums", Some("root".to_string())))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::ContainerExists { id } if id == "albums"));
    }

    #[tokio::test]
    async fn test_create_with_missing_parent() {
        let store = create_test_store().await;
        let err = store
            .create(Container::new("orphan", Some("nowhere".to_string())))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidHierarchy { .. }));
    }

    #[tokio::test]
    async fn test_update_metadata_partial() {
        let store = create_test_store().await;
        store
            .create(Container::new("c1", Some("root".to_string())).with_title("Old title"))
            .await
            .unwrap();

        // None leaves the title untouched
        let updated = store
            .update_metadata("c1", None, Some("New description".to_string()))
            .await
            .unwrap();
        assert_eq!(updated.title.as_deref(), Some("Old title"));
        assert_eq!(updated.description.as_deref(), Some("New description"));
        assert!(updated.modified_at >= updated.created_at);
    }

    #[tokio::test]
    async fn test_update_metadata_missing_container() {
        let store = create_test_store().await;
        let err = store
            .update_metadata("ghost", Some("t".to_string()), None)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::ContainerNotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_empty_container() {
        let store = create_test_store().await;
        store
            .create(Container::new("c1", Some("root".to_string())))
            .await
            .unwrap();

        store.delete("c1").await.unwrap();
        assert!(!store.exists("c1").await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_nonempty_container() {
        let store = create_test_store().await;
        store
            .create(Container::new("c1", Some("root".to_string())))
            .await
            .unwrap();
        store.add_member("c1", "r1").await.unwrap();
        store.add_member("c1", "r2").await.unwrap();

        let err = store.delete("c1").await.unwrap_err();
        match err {
            StoreError::ContainerNotEmpty { id, member_count } => {
                assert_eq!(id, "c1");
                assert_eq!(member_count, 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_delete_container_with_children() {
        let store = create_test_store().await;
        store
            .create(Container::new("parent", Some("root".to_string())))
            .await
            .unwrap();
        store
            .create(Container::new("child", Some("parent".to_string())))
            .await
            .unwrap();

        let err = store.delete("parent").await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidHierarchy { .. }));

        // Deleting bottom-up succeeds
        store.delete("child").await.unwrap();
        store.delete("parent").await.unwrap();
    }

    #[tokio::test]
    async fn test_add_member_duplicate() {
        let store = create_test_store().await;
        store.add_member("root", "r1").await.unwrap();

        let err = store.add_member("root", "r1").await.unwrap_err();
        assert!(matches!(err, StoreError::ResourceExists { id } if id == "r1"));
    }

    #[tokio::test]
    async fn test_add_member_missing_container() {
        let store = create_test_store().await;
        let err = store.add_member("ghost", "r1").await.unwrap_err();
        assert!(matches!(err, StoreError::ContainerNotFound { .. }));
    }

    #[tokio::test]
    async fn test_remove_member_keeps_order() {
        let store = create_test_store().await;
        for id in ["r1", "r2", "r3", "r4"] {
            store.add_member("root", id).await.unwrap();
        }

        store.remove_member("root", "r2").await.unwrap();

        let listing = store
            .list_members("root", PaginationOptions::default())
            .await
            .unwrap();
        assert_eq!(listing.members, vec!["r1", "r3", "r4"]);
    }

    #[tokio::test]
    async fn test_remove_member_missing() {
        let store = create_test_store().await;
        let err = store.remove_member("root", "ghost").await.unwrap_err();
        assert!(matches!(err, StoreError::ResourceNotFound { id } if id == "ghost"));
    }

    #[tokio::test]
    async fn test_list_members_window() {
        let store = create_test_store().await;
        for i in 0..10 {
            store.add_member("root", &format!("r{i}")).await.unwrap();
        }

        let listing = store
            .list_members("root", PaginationOptions { limit: 3, offset: 4 })
            .await
            .unwrap();
        assert_eq!(listing.members, vec!["r4", "r5", "r6"]);
        assert_eq!(listing.total, 10);
        assert_eq!(listing.pagination, PaginationOptions { limit: 3, offset: 4 });
    }

    #[tokio::test]
    async fn test_list_members_offset_beyond_total() {
        let store = create_test_store().await;
        store.add_member("root", "r1").await.unwrap();

        let listing = store
            .list_members("root", PaginationOptions { limit: 5, offset: 99 })
            .await
            .unwrap();
        assert!(listing.members.is_empty());
        assert_eq!(listing.total, 1);
    }

    #[tokio::test]
    async fn test_parent_and_children() {
        let store = create_test_store().await;
        store
            .create(Container::new("b", Some("root".to_string())))
            .await
            .unwrap();
        store
            .create(Container::new("a", Some("root".to_string())))
            .await
            .unwrap();

        assert_eq!(store.parent_of("root").await.unwrap(), None);
        assert_eq!(store.parent_of("a").await.unwrap(), Some("root".to_string()));
        // Children come back sorted for stable output
        assert_eq!(store.children_of("root").await.unwrap(), vec!["a", "b"]);
        assert!(store.children_of("a").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_path_of_runs_root_to_leaf() {
        let store = create_test_store().await;
        store
            .create(Container::new("mid", Some("root".to_string())))
            .await
            .unwrap();
        store
            .create(Container::new("leaf", Some("mid".to_string())))
            .await
            .unwrap();

        let path = store.path_of("leaf").await.unwrap();
        assert_eq!(path, vec!["root", "mid", "leaf"]);
        assert_eq!(store.path_of("root").await.unwrap(), vec!["root"]);
    }

    #[tokio::test]
    async fn test_bootstrap_root_is_idempotent() {
        let store = MemoryContainerStore::new();
        let first = store.bootstrap_root("root").await.unwrap();
        store.add_member("root", "r1").await.unwrap();

        // Second bootstrap returns the live container, not a fresh one
        let second = store.bootstrap_root("root").await.unwrap();
        assert_eq!(second.id, first.id);
        assert_eq!(second.member_count(), 1);
    }
}
