//! Per-site extraction tables.
//!
//! Each list is ordered from the current markup to older or more generic
//! fallbacks. Update these tables, not the parser, when a storefront changes
//! its HTML.

use smartshop_core::Platform;

use super::rules::{AttrRule, Exclusion, TextRule};
use super::SiteProfile;
use crate::price::RUPEE;

const FIRST_ANCHOR_HREF: AttrRule = AttrRule {
    selector: "a",
    attr: "href",
};

const FIRST_IMAGE_SRC: AttrRule = AttrRule {
    selector: "img",
    attr: "src",
};

pub static FLIPKART: SiteProfile = SiteProfile {
    platform: Platform::Flipkart,
    base_url: "https://www.flipkart.com",
    search_path: "/search",
    query_param: "q",
    term_separator: "%20",
    delivery_minutes: 30,
    currency: RUPEE,
    containers: &[
        "div._1AtVbE._4ddWXP",
        "div._1AtVbE",
        "div._13oc-S",
        "div._2kHMtA",
        "div._4ddWXP",
        "div._2B099V",
        "div[data-id]",
    ],
    exclusions: &[],
    name: &[TextRule::AnchorTitleOrText],
    price: &[TextRule::CurrencyFragment],
    link: &[FIRST_ANCHOR_HREF],
    image: &[FIRST_IMAGE_SRC],
};

pub static AMAZON: SiteProfile = SiteProfile {
    platform: Platform::Amazon,
    base_url: "https://www.amazon.in",
    search_path: "/s",
    query_param: "k",
    term_separator: "+",
    delivery_minutes: 35,
    currency: RUPEE,
    containers: &[
        "div.s-result-item[data-component-type=\"s-search-result\"]",
        "div.sg-col-4-of-12.s-result-item",
        "div.sg-col-4-of-16.s-result-item",
        "div.s-asin",
    ],
    exclusions: &[Exclusion {
        attr: "data-component-type",
        value: "sp-sponsored-result",
        reason: "sponsored placement",
    }],
    name: &[
        TextRule::ElementText("h2"),
        TextRule::ElementText("span[class*=\"a-text-normal\"], span[class*=\"a-color-base\"]"),
    ],
    price: &[
        TextRule::CurrencyFragment,
        TextRule::CurrencyElement("span[class*=\"a-price\"], span[class*=\"a-color-price\"]"),
    ],
    link: &[
        AttrRule {
            selector: "a[class*=\"a-link-normal\"]",
            attr: "href",
        },
        FIRST_ANCHOR_HREF,
    ],
    image: &[FIRST_IMAGE_SRC],
};

pub static MEESHO: SiteProfile = SiteProfile {
    platform: Platform::Meesho,
    base_url: "https://www.meesho.com",
    search_path: "/search",
    query_param: "q",
    term_separator: "-",
    delivery_minutes: 40,
    currency: RUPEE,
    containers: &[
        "div[data-testid=\"product-container\"]",
        "div.ProductList__GridCol-sc-8lnc8o-0",
        "div.NewProductCard__Base",
        "div.ShopCard__StyledCard",
    ],
    exclusions: &[],
    name: &[
        TextRule::ElementText("p[data-testid=\"product-name\"]"),
        TextRule::ElementText("p.Text__StyledText-sc-oo0kvp-0"),
        TextRule::ElementText("p.NewProductCard__ProductTitle_Desktop"),
        TextRule::ElementText("div.NewProductCard__ProductName"),
        TextRule::ElementText("p.ShopCard__ProductName"),
    ],
    price: &[
        TextRule::ElementText("h5[data-testid=\"product-price\"]"),
        TextRule::ElementText("h5.Text__StyledText-sc-oo0kvp-0"),
        TextRule::ElementText("div.NewProductCard__PriceRow"),
        TextRule::ElementText("h4.NewProductCard__DiscountedPriceText"),
        TextRule::ElementText("p.ShopCard__PriceParagraph"),
    ],
    link: &[
        AttrRule {
            selector: "a[data-testid=\"product-link\"]",
            attr: "href",
        },
        AttrRule {
            selector: "a.NewProductCard__Anchor",
            attr: "href",
        },
        AttrRule {
            selector: "a.ShopCard__StyledAnchor",
            attr: "href",
        },
    ],
    image: &[
        AttrRule {
            selector: "img[data-testid=\"product-image\"]",
            attr: "src",
        },
        AttrRule {
            selector: "img.NewProductCard__Image",
            attr: "src",
        },
        AttrRule {
            selector: "img.ShopCard__Image",
            attr: "src",
        },
    ],
};
