use pretty_assertions::assert_eq;
use rescuenet_router::{
    DEFAULT_DESCRIPTION, HeadSnapshot, MetaTag, Page, Router, RouteTable, apply_metadata,
    compute_metadata,
};

#[test]
fn standard_table_resolves_every_page() {
    let table = RouteTable::standard();
    let cases = [
        ("/", Page::Home),
        ("/about", Page::About),
        ("/contact/", Page::Contact),
        ("/disasters", Page::Disasters),
        ("/disasters/2", Page::DisasterDetail),
        ("/campaigns", Page::Campaigns),
        ("/campaigns/1?ref=hero", Page::CampaignDetail),
        ("/volunteer", Page::Volunteer),
        ("/donate#form", Page::Donate),
        ("/blog", Page::Blog),
        ("/blog/emergency-preparedness-guide", Page::BlogDetail),
    ];
    assert_eq!(table.len(), cases.len());
    for (path, page) in cases {
        let m = table.resolve(path).unwrap_or_else(|| panic!("{path} resolves"));
        assert_eq!(m.route.page, page, "{path}");
    }
    assert!(table.resolve("/blog/a/b").is_none());
    assert!(table.resolve("/admin").is_none());
}

#[test]
fn every_standard_route_has_metadata() {
    let table = RouteTable::standard();
    for route in table.routes() {
        let meta = route.meta.as_ref().expect("standard routes carry meta");
        assert!(meta.title.contains("RescueNet"), "{}", meta.title);
        assert!(!meta.description.is_empty());
    }
    let home = table.find(Page::Home).and_then(|r| r.meta.as_ref()).expect("home meta");
    assert_eq!(home.title, "RescueNet - Disaster Relief & Humanitarian Aid");
    let blog = table.find(Page::Blog).and_then(|r| r.meta.as_ref()).expect("blog meta");
    assert_eq!(blog.title, "Blog - RescueNet");
}

#[test]
fn detail_navigation_captures_params() {
    let mut router = Router::new(HeadSnapshot::with_all_tags());
    let nav = router.navigate("/disasters/4");
    assert_eq!(nav.route, Some(Page::DisasterDetail));
    assert_eq!(nav.params.id("id"), Some(4));
    assert_eq!(router.document().title(), "Disaster Details - RescueNet");
    assert_eq!(
        router.document().meta(MetaTag::TwitterDescription),
        Some("Detailed information about this disaster and RescueNet's relief efforts.")
    );
}

#[test]
fn head_without_social_tags_only_gets_description() {
    let mut head = HeadSnapshot::new().with_tag(MetaTag::Description, "");
    let meta = compute_metadata(None);
    assert_eq!(apply_metadata(&mut head, &meta), 1);
    assert_eq!(head.meta(MetaTag::Description), Some(DEFAULT_DESCRIPTION));
}

#[test]
fn navigation_serializes_for_tooling() {
    let mut router = Router::new(HeadSnapshot::new());
    let nav = router.navigate("/blog/mental-health-after-disasters");
    let json = serde_json::to_value(&nav).expect("navigation serializes");
    assert_eq!(json["route"], "blog-detail");
    assert_eq!(json["params"]["slug"], "mental-health-after-disasters");
    assert_eq!(json["scroll"], "top");
    assert_eq!(json["metadata"]["og_title"], "Blog Article - RescueNet");
}

#[test]
fn link_building_round_trips_through_resolve() {
    let table = RouteTable::standard();
    let route = table.find(Page::CampaignDetail).expect("campaign detail route");
    let href = route.pattern.build(&[("id", "3")]).expect("id supplied");
    assert_eq!(href, "/campaigns/3");
    let m = table.resolve(&href).expect("built path resolves");
    assert_eq!(m.route.page, Page::CampaignDetail);
}
