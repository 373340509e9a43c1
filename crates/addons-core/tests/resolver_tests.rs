//! Resolution scenarios against real source trees

use addons_core::{
    AddonsResolver, Error, MapEnv, ManifestSet, ResolveOptions, SourceKey,
};
use addons_fs::{NormalizedPath, SourceTree};
use addons_test_utils::TestTree;
use pretty_assertions::assert_eq;
use std::collections::BTreeMap;

fn resolver(tree: &TestTree, env: MapEnv) -> AddonsResolver<MapEnv> {
    AddonsResolver::new(
        SourceTree::new(tree.root()),
        ManifestSet::for_version(16.0),
        env,
    )
}

fn resolve(tree: &TestTree, options: ResolveOptions) -> BTreeMap<String, SourceKey> {
    resolver(tree, MapEnv::new()).resolve_all(options).unwrap()
}

fn expected(pairs: &[(&str, &str)]) -> BTreeMap<String, SourceKey> {
    pairs
        .iter()
        .map(|(addon, source)| (addon.to_string(), SourceKey::from(*source)))
        .collect()
}

mod empty_inputs {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_config_and_empty_tree_yield_nothing() {
        let tree = TestTree::new();
        assert!(resolve(&tree, ResolveOptions::default()).is_empty());
    }

    #[test]
    fn config_without_sections_yields_nothing() {
        let tree = TestTree::new();
        tree.config("");
        assert!(resolve(&tree, ResolveOptions::default()).is_empty());
        assert!(resolve(&tree, ResolveOptions::default().unfiltered()).is_empty());
    }

    #[test]
    fn comment_only_config_behaves_as_missing_config() {
        for content in ["", "# nothing selected yet\n"] {
            let tree = TestTree::new();
            tree.plain_dir("odoo/addons", "sale")
                .addon("private", "mine")
                .config(content);

            let everything = expected(&[("mine", "private"), ("sale", "odoo/addons")]);
            assert_eq!(resolve(&tree, ResolveOptions::default()), everything);
            assert_eq!(resolve(&tree, ResolveOptions::default().unfiltered()), everything);
        }
    }

    #[test]
    fn missing_config_still_auto_adds_special_sources() {
        let tree = TestTree::new();
        tree.addon("odoo/addons", "sale").addon("private", "mine");
        assert_eq!(
            resolve(&tree, ResolveOptions::default()),
            expected(&[("mine", "private"), ("sale", "odoo/addons")])
        );
    }
}

mod registration {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn documented_example() {
        let tree = TestTree::new();
        tree.addon("private", "mymodule")
            .addon("private", "unlisted")
            .addon("odoo/addons", "sale")
            .addon("odoo/addons", "account")
            .config("private: [mymodule]\n");

        assert_eq!(
            resolve(&tree, ResolveOptions::default()),
            expected(&[
                ("account", "odoo/addons"),
                ("mymodule", "private"),
                ("sale", "odoo/addons"),
            ])
        );
    }

    #[test]
    fn directory_without_manifest_is_never_selected() {
        let tree = TestTree::new();
        tree.addon("oca", "web_tree")
            .plain_dir("oca", "web_docs")
            .config("oca: ['web_*']\nprivate: []\nodoo/addons: []\n");

        assert_eq!(
            resolve(&tree, ResolveOptions::default()),
            expected(&[("web_tree", "oca")])
        );
    }

    #[test]
    fn glob_patterns_select_matching_addons() {
        let tree = TestTree::new();
        tree.addon("OCA/web", "web_responsive")
            .addon("OCA/web", "web_tree_many2one")
            .addon("OCA/web", "web_widget_color")
            .config("OCA/web:\n  - web_responsive\n  - 'web_tree_*'\nprivate: []\nodoo/addons: []\n");

        assert_eq!(
            resolve(&tree, ResolveOptions::default()),
            expected(&[("web_responsive", "OCA/web"), ("web_tree_many2one", "OCA/web")])
        );
    }

    #[test]
    fn overlapping_globs_register_once() {
        let tree = TestTree::new();
        tree.addon("oca", "web_tree")
            .config("oca: [web_tree, 'web_*', '*']\nprivate: []\nodoo/addons: []\n");

        assert_eq!(
            resolve(&tree, ResolveOptions::default()),
            expected(&[("web_tree", "oca")])
        );
    }

    #[test]
    fn legacy_manifest_recognized_before_threshold() {
        let tree = TestTree::new();
        tree.legacy_addon("oca", "old")
            .addon("oca", "new")
            .config("oca: ['*']\nprivate: []\nodoo/addons: []\n");

        let legacy = AddonsResolver::new(
            SourceTree::new(tree.root()),
            ManifestSet::for_version(9.0),
            MapEnv::new(),
        );
        assert_eq!(
            legacy.resolve_all(ResolveOptions::default()).unwrap(),
            expected(&[("old", "oca")])
        );
        assert_eq!(
            resolve(&tree, ResolveOptions::default()),
            expected(&[("new", "oca")])
        );
    }

    #[test]
    fn yml_extension_is_used_as_fallback() {
        let tree = TestTree::new();
        tree.addon("oca", "web_tree")
            .config_named("addons.yml", "oca: [web_tree]\n");

        assert_eq!(
            resolve(&tree, ResolveOptions::default()),
            expected(&[("web_tree", "oca")])
        );
    }

    #[test]
    fn malformed_config_is_an_error() {
        let tree = TestTree::new();
        tree.config("private: [unclosed\n");

        let err = resolver(&tree, MapEnv::new())
            .resolve(ResolveOptions::default())
            .unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }), "got: {err}");
    }
}

mod precedence {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn private_wins_over_every_other_source() {
        let tree = TestTree::new();
        tree.addon("private", "web_tree")
            .addon("oca", "web_tree")
            .addon("acme", "web_tree")
            .addon("odoo/addons", "web_tree")
            .config("private: [web_tree]\noca: [web_tree]\nacme: [web_tree]\nodoo/addons: [web_tree]\n");

        assert_eq!(
            resolve(&tree, ResolveOptions::default()),
            expected(&[("web_tree", "private")])
        );
    }

    #[test]
    fn core_only_registration_keeps_core() {
        let tree = TestTree::new();
        tree.addon("odoo/addons", "sale")
            .config("odoo/addons: [sale]\nprivate: []\n");

        assert_eq!(
            resolve(&tree, ResolveOptions::default()),
            expected(&[("sale", "odoo/addons")])
        );
    }

    #[test]
    fn single_repo_overrides_core() {
        let tree = TestTree::new();
        tree.addon("odoo/addons", "web")
            .addon("oca", "web")
            .config("odoo/addons: ['*']\noca: [web]\nprivate: []\n");

        assert_eq!(
            resolve(&tree, ResolveOptions::default()),
            expected(&[("web", "oca")])
        );
    }

    #[test]
    fn two_repos_claiming_an_addon_is_ambiguous() {
        let tree = TestTree::new();
        tree.addon("oca", "web_tree")
            .addon("acme", "web_tree")
            .addon("acme", "acme_base")
            .config("oca: [web_tree]\n---\nacme: ['*']\n");

        let err = resolver(&tree, MapEnv::new())
            .resolve_all(ResolveOptions::default())
            .unwrap_err();

        match err {
            Error::Ambiguous { addon, sources } => {
                assert_eq!(addon, "web_tree");
                assert!(sources.contains(&SourceKey::from("oca")));
                assert!(sources.contains(&SourceKey::from("acme")));
            }
            other => panic!("expected ambiguity, got {other}"),
        }
    }

    #[test]
    fn ambiguity_is_reported_lazily() {
        let tree = TestTree::new();
        tree.addon("oca", "zeta")
            .addon("acme", "zeta")
            .addon("acme", "alpha")
            .config("oca: [zeta]\nacme: ['*']\nprivate: []\nodoo/addons: []\n");

        let items: Vec<_> = resolver(&tree, MapEnv::new())
            .resolve(ResolveOptions::default())
            .unwrap()
            .collect();

        assert_eq!(items.len(), 2);
        assert_eq!(
            items[0].as_ref().unwrap(),
            &("alpha".to_string(), SourceKey::from("acme"))
        );
        assert!(matches!(items[1], Err(Error::Ambiguous { .. })));
    }
}

mod strict_mode {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn unexpandable_pattern_fails_with_exact_pattern() {
        let tree = TestTree::new();
        tree.addon("oca", "web_tree")
            .config("oca: [web_tree, 'missing_*']\nprivate: []\nodoo/addons: []\n");

        let err = resolver(&tree, MapEnv::new())
            .resolve(ResolveOptions::default().strict())
            .unwrap_err();

        let missing = NormalizedPath::new(tree.src()).join("oca").join("missing_*");
        match err {
            Error::Strict {
                missing_globs,
                missing_manifests,
            } => {
                assert!(missing_globs.contains(&missing), "got: {missing_globs:?}");
                assert!(missing_manifests.is_empty());
            }
            other => panic!("expected strict error, got {other}"),
        }
    }

    #[test]
    fn lenient_mode_ignores_unexpandable_pattern() {
        let tree = TestTree::new();
        tree.addon("oca", "web_tree")
            .config("oca: [web_tree, 'missing_*']\nprivate: []\nodoo/addons: []\n");

        assert_eq!(
            resolve(&tree, ResolveOptions::default()),
            expected(&[("web_tree", "oca")])
        );
    }

    #[test]
    fn strict_error_collects_every_problem() {
        let tree = TestTree::new();
        tree.plain_dir("oca", "docs")
            .plain_dir("acme", "scripts")
            .config("oca: [docs, nope]\nacme: [scripts, gone]\nprivate: []\nodoo/addons: []\n");

        let err = resolver(&tree, MapEnv::new())
            .resolve(ResolveOptions::default().strict())
            .unwrap_err();

        match err {
            Error::Strict {
                missing_globs,
                missing_manifests,
            } => {
                assert_eq!(missing_globs.len(), 2);
                assert_eq!(
                    missing_manifests.into_iter().collect::<Vec<_>>(),
                    vec![tree.src().join("acme/scripts"), tree.src().join("oca/docs")]
                );
            }
            other => panic!("expected strict error, got {other}"),
        }
    }

    #[test]
    fn fallback_directories_are_not_checked() {
        let tree = TestTree::new();
        tree.plain_dir("private", "notes")
            .addon("oca", "web_tree")
            .config("oca: [web_tree]\n");

        assert_eq!(
            resolve(&tree, ResolveOptions::default().strict()),
            expected(&[("notes", "private"), ("web_tree", "oca")])
        );
    }
}

mod only_clause {
    use super::*;
    use pretty_assertions::assert_eq;

    const CONFIG: &str = "\
oca: [base_addon]
private: []
odoo/addons: []
---
ONLY:
  PGDATABASE: [prod]
oca: [prod_addon]
";

    fn tree() -> TestTree {
        let tree = TestTree::new();
        tree.addon("oca", "base_addon")
            .addon("oca", "prod_addon")
            .config(CONFIG);
        tree
    }

    #[test]
    fn filtered_skips_section_when_variable_unset() {
        let tree = tree();
        assert_eq!(
            resolver(&tree, MapEnv::new())
                .resolve_all(ResolveOptions::default())
                .unwrap(),
            expected(&[("base_addon", "oca")])
        );
    }

    #[test]
    fn filtered_skips_section_when_value_differs() {
        let tree = tree();
        let env = MapEnv::new().with("PGDATABASE", "devel");
        assert_eq!(
            resolver(&tree, env).resolve_all(ResolveOptions::default()).unwrap(),
            expected(&[("base_addon", "oca")])
        );
    }

    #[test]
    fn filtered_includes_matching_section() {
        let tree = tree();
        let env = MapEnv::new().with("PGDATABASE", "prod");
        assert_eq!(
            resolver(&tree, env).resolve_all(ResolveOptions::default()).unwrap(),
            expected(&[("base_addon", "oca"), ("prod_addon", "oca")])
        );
    }

    #[test]
    fn unfiltered_processes_every_section() {
        let tree = tree();
        assert_eq!(
            resolve(&tree, ResolveOptions::default().unfiltered()),
            expected(&[("base_addon", "oca"), ("prod_addon", "oca")])
        );
    }

    #[test]
    fn skipped_section_does_not_mark_special_sources_seen() {
        let tree = TestTree::new();
        tree.addon("private", "mine")
            .addon("private", "other")
            .config("ONLY:\n  PGDATABASE: [prod]\nprivate: [mine]\n");

        assert_eq!(
            resolve(&tree, ResolveOptions::default()),
            expected(&[("mine", "private"), ("other", "private")])
        );
    }
}

mod unfiltered_defaults {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn omitted_special_sources_behave_as_catch_all() {
        let tree = TestTree::new();
        tree.addon("private", "mine")
            .addon("odoo/addons", "sale")
            .addon("oca", "web_tree")
            .addon("oca", "web_other")
            .config("oca: [web_tree]\n");

        let explicit = TestTree::new();
        explicit
            .addon("private", "mine")
            .addon("odoo/addons", "sale")
            .addon("oca", "web_tree")
            .addon("oca", "web_other")
            .config("oca: [web_tree]\nprivate: ['*']\nodoo/addons: ['*']\n");

        let result = resolve(&tree, ResolveOptions::default().unfiltered());
        assert_eq!(result, resolve(&explicit, ResolveOptions::default().unfiltered()));
        assert_eq!(
            result,
            expected(&[("mine", "private"), ("sale", "odoo/addons"), ("web_tree", "oca")])
        );
    }

    #[test]
    fn catch_all_applies_manifest_check() {
        let tree = TestTree::new();
        tree.addon("private", "mine")
            .plain_dir("private", "notes")
            .config("oca: []\n");

        assert_eq!(
            resolve(&tree, ResolveOptions::default().unfiltered()),
            expected(&[("mine", "private")])
        );

        let err = resolver(&tree, MapEnv::new())
            .resolve(ResolveOptions::default().unfiltered().strict())
            .unwrap_err();
        assert!(matches!(err, Error::Strict { .. }), "got: {err}");
    }

    #[test]
    fn explicit_special_patterns_are_kept() {
        let tree = TestTree::new();
        tree.addon("private", "mine")
            .addon("private", "other")
            .config("private: [mine]\n");

        assert_eq!(
            resolve(&tree, ResolveOptions::default().unfiltered()),
            expected(&[("mine", "private")])
        );
    }
}

#[test]
fn resolution_is_repeatable() {
    let tree = TestTree::new();
    tree.addon("private", "mine")
        .addon("odoo/addons", "sale")
        .addon("oca", "web_tree")
        .config("oca: ['*']\n");

    let resolver = resolver(&tree, MapEnv::new());
    let first = resolver.resolve_all(ResolveOptions::default()).unwrap();
    let second = resolver.resolve_all(ResolveOptions::default()).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 3);
}

#[test]
fn resolution_rereads_configuration() {
    let tree = TestTree::new();
    tree.addon("oca", "web_tree")
        .addon("oca", "web_other")
        .config("oca: [web_tree]\nprivate: []\nodoo/addons: []\n");

    let resolver = resolver(&tree, MapEnv::new());
    assert_eq!(resolver.resolve_all(ResolveOptions::default()).unwrap().len(), 1);

    tree.config("oca: ['*']\nprivate: []\nodoo/addons: []\n");
    assert_eq!(resolver.resolve_all(ResolveOptions::default()).unwrap().len(), 2);
}
