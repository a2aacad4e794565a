//! Galactic Conquest documents: campaigns listing their planets and trade routes by name.
//!
//! ```xml
//! <Campaigns>
//!     <Campaign Name="Outer_Rim">
//!         <Locations>Hoth, Bespin</Locations>
//!         <Trade_Routes>Hoth_Bespin</Trade_Routes>
//!     </Campaign>
//! </Campaigns>
//! ```
//!
//! A missing `Locations`/`Trade_Routes` tag means the campaign has no members of that kind.
//! Members are separated by commas or line breaks; spaces inside a name are kept.

use crate::repository::Repository;
use crate::xml::XmlDocument;
use crate::{Campaign, Planet, TradeRoute, statics};
use anyhow::Context;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::{fs, path::Path};

pub fn load_campaigns(path: &Path, repository: &Repository) -> anyhow::Result<Vec<Campaign>> {
    let doc = XmlDocument::load(path).with_context(|| format!("loading campaigns {path:?}"))?;
    Ok(campaigns_from_document(&doc, repository))
}

/// Builds campaigns from a parsed document, resolving member names against `repository`.
/// Names that do not resolve are dropped.
pub fn campaigns_from_document(doc: &XmlDocument, repository: &Repository) -> Vec<Campaign> {
    let mut campaigns = Vec::new();
    for (id, element) in doc.elements_with_tag(statics::XML_TAG_CAMPAIGN) {
        let Some(name) = element.name().map(str::trim).filter(|n| !n.is_empty()) else {
            tracing::warn!("skipping campaign with an empty name");
            continue;
        };

        let planets = doc
            .first_in_subtree(id, statics::XML_TAG_LOCATIONS)
            .map(|e| resolve_members(name, e.text(), |n| repository.planet(n).cloned()));
        let trade_routes = doc
            .first_in_subtree(id, statics::XML_TAG_TRADE_ROUTES)
            .map(|e| resolve_members(name, e.text(), |n| repository.trade_route(n).cloned()));

        campaigns.push(Campaign::with_members(name, planets, trade_routes));
    }
    campaigns
}

fn split_member_list(text: &str) -> impl Iterator<Item = &str> {
    text.split([',', '\n', '\r'])
        .map(str::trim)
        .filter(|member| !member.is_empty())
}

fn resolve_members<T>(campaign: &str, text: &str, lookup: impl Fn(&str) -> Option<T>) -> Vec<T> {
    split_member_list(text)
        .filter_map(|member| {
            let found = lookup(member);
            if found.is_none() {
                tracing::warn!(campaign, member, "unknown campaign member, skipping");
            }
            found
        })
        .collect()
}

pub fn campaigns_to_xml(campaigns: &[Campaign]) -> anyhow::Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 4);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    writer.write_event(Event::Start(BytesStart::new(statics::XML_TAG_CAMPAIGNS)))?;

    for campaign in campaigns {
        let mut start = BytesStart::new(statics::XML_TAG_CAMPAIGN);
        start.push_attribute((statics::XML_ATTR_NAME, campaign.name()));
        writer.write_event(Event::Start(start))?;

        if let Some(planets) = campaign.planets() {
            let names: Vec<&str> = planets.iter().map(Planet::name).collect();
            write_text_element(&mut writer, statics::XML_TAG_LOCATIONS, &names.join(", "))?;
        }
        if let Some(trade_routes) = campaign.trade_routes() {
            let names: Vec<&str> = trade_routes.iter().map(TradeRoute::name).collect();
            write_text_element(&mut writer, statics::XML_TAG_TRADE_ROUTES, &names.join(", "))?;
        }

        writer.write_event(Event::End(BytesEnd::new(statics::XML_TAG_CAMPAIGN)))?;
    }

    writer.write_event(Event::End(BytesEnd::new(statics::XML_TAG_CAMPAIGNS)))?;
    let text = String::from_utf8(writer.into_inner()).context("campaign XML is not UTF-8")?;
    Ok(text)
}

fn write_text_element(writer: &mut Writer<Vec<u8>>, tag: &str, text: &str) -> anyhow::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

pub fn save_campaigns(path: &Path, campaigns: &[Campaign]) -> anyhow::Result<()> {
    let text = campaigns_to_xml(campaigns)?;
    fs::write(path, text).with_context(|| format!("writing {path:?}"))?;
    tracing::info!(path = %path.display(), campaigns = campaigns.len(), "campaigns saved");
    Ok(())
}
