//! Macros for reducing boilerplate when defining records
//!
//! Every stored record shares the same base fields and trait plumbing;
//! only the domain fields differ.

/// Complete macro to create a record with its `Entity` implementation
///
/// Injects the base fields `id`, `created_at`, `updated_at`, `deleted_at`,
/// serializes every field in camelCase and generates a `new()` constructor
/// taking the domain fields in declaration order.
///
/// # Example
///
/// ```rust,ignore
/// impl_record!(
///     /// Organizational area
///     Area,
///     "area",
///     "areas",
///     {
///         name: String,
///         description: Option<String>,
///         is_active: bool,
///     }
/// );
///
/// let area = Area::new("Operaciones".to_string(), None, true);
/// ```
#[macro_export]
macro_rules! impl_record {
    (
        $(#[$meta:meta])*
        $type:ident,
        $singular:expr,
        $plural:expr,
        {
            $( $(#[$field_meta:meta])* $field:ident : $field_ty:ty ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $type {
            /// Unique identifier for this record
            pub id: ::uuid::Uuid,

            $( $(#[$field_meta])* pub $field : $field_ty, )*

            /// When this record was created
            pub created_at: ::chrono::DateTime<::chrono::Utc>,

            /// When this record was last updated
            pub updated_at: ::chrono::DateTime<::chrono::Utc>,

            /// When this record was soft-deleted (if applicable)
            #[serde(default, skip_serializing_if = "Option::is_none")]
            pub deleted_at: Option<::chrono::DateTime<::chrono::Utc>>,
        }

        impl $crate::core::entity::Entity for $type {
            fn resource_name() -> &'static str {
                $plural
            }

            fn resource_name_singular() -> &'static str {
                $singular
            }

            fn id(&self) -> ::uuid::Uuid {
                self.id
            }

            fn created_at(&self) -> ::chrono::DateTime<::chrono::Utc> {
                self.created_at
            }

            fn updated_at(&self) -> ::chrono::DateTime<::chrono::Utc> {
                self.updated_at
            }

            fn deleted_at(&self) -> Option<::chrono::DateTime<::chrono::Utc>> {
                self.deleted_at
            }

            fn touch(&mut self) {
                self.updated_at = ::chrono::Utc::now();
            }

            fn soft_delete(&mut self) {
                let now = ::chrono::Utc::now();
                self.deleted_at = Some(now);
                self.updated_at = now;
            }
        }

        impl $type {
            /// Create a new record with a fresh id and timestamps
            #[allow(clippy::too_many_arguments)]
            pub fn new($( $field: $field_ty ),*) -> Self {
                let now = ::chrono::Utc::now();
                Self {
                    id: ::uuid::Uuid::new_v4(),
                    $( $field, )*
                    created_at: now,
                    updated_at: now,
                    deleted_at: None,
                }
            }
        }
    };
}
