/// Builds a [`Registry`](crate::Registry) from named provider entries.
///
/// Each entry names an identity, its ordered dependency list, and a
/// construction routine taking the resolved dependency values. Entries are
/// applied in order, last registration wins.
///
/// # Examples
/// ```rust
/// use soloist::{providers, Container, Dependencies};
///
/// let registry = providers! {
///     "db" => [] => |_| Ok("DB1"),
///     "svc" => ["db"] => |deps: Dependencies| {
///         let db = deps.get::<&str>(0)?;
///         Ok(format!("SVC({db})"))
///     },
/// };
///
/// let container = Container::new(registry);
/// assert_eq!(*container.resolve_as::<String>("svc").unwrap(), "SVC(DB1)");
/// ```
#[macro_export]
macro_rules! providers {
    (
        $( $id:expr => [ $($dep:expr),* $(,)? ] => $factory:expr ),* $(,)?
    ) => {{
        let mut builder = $crate::RegistryBuilder::new();
        $(
            {
                #[allow(unused_mut)]
                let mut depends_on: $crate::macros_utils::Vec<$crate::Identity> = $crate::macros_utils::Vec::new();
                $( depends_on.push($crate::Identity::from($dep)); )*
                builder = builder.provide($crate::Provider::new($id, depends_on, $factory));
            }
        )*
        builder.build()
    }};
}

#[cfg(test)]
mod tests {
    extern crate std;

    use crate::{Container, Dependencies};

    use alloc::{format, string::String, string::ToString as _};
    use tracing_test::traced_test;

    #[test]
    #[traced_test]
    fn test_empty() {
        let registry = providers! {};
        assert!(registry.is_empty());
    }

    #[test]
    #[traced_test]
    fn test_entries_with_and_without_dependencies() {
        let registry = providers! {
            "db" => [] => |_| Ok("DB1"),
            "email" => [] => |_| Ok("EMAIL1"),
            "svc" => ["db", "email"] => |deps: Dependencies| {
                let db = deps.get::<&str>(0)?;
                let email = deps.get::<&str>(1)?;
                Ok(format!("SVC({db},{email})"))
            },
        };
        assert_eq!(registry.len(), 3);

        let container = Container::new(registry);
        assert_eq!(*container.resolve_as::<String>("svc").unwrap(), "SVC(DB1,EMAIL1)");
    }

    #[test]
    #[traced_test]
    fn test_last_entry_wins() {
        let registry = providers! {
            "db" => [] => |_| Ok("DB1"),
            "db" => [] => |_| Ok("DB2"),
        };
        assert_eq!(registry.len(), 1);

        let container = Container::new(registry);
        assert_eq!(*container.resolve_as::<&str>("db").unwrap(), "DB2");
    }
}
