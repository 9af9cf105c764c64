// lvl - CLI for the Level27 hosting management API
// Copyright (C) 2026 The lvl contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Turning command line arguments into entity IDs.
//!
//! Anything that accepts an ID also accepts a name. Integers are taken as
//! IDs directly; anything else is looked up through a filtered list call
//! and must match exactly one entity by name.

use crate::client::{ApiClient, ApiError, ListQuery};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Not a valid {0} ID!")]
    InvalidId(String),
    #[error("Unable to find {entity}: {arg}")]
    NotFound { entity: String, arg: String },
    #[error(
        "Multiple {entity}s found matching '{arg}', use an ID instead:\n{}",
        candidates.join("\n")
    )]
    Ambiguous {
        entity: String,
        arg: String,
        candidates: Vec<String>,
    },
    #[error(transparent)]
    Api(#[from] ApiError),
}

pub fn parse_id(arg: &str, entity: &str) -> Result<i64, ResolveError> {
    arg.trim()
        .parse()
        .map_err(|_| ResolveError::InvalidId(entity.to_string()))
}

/// Splits every argument on commas and parses each part as an ID.
pub fn split_ids<S: AsRef<str>>(args: &[S], entity: &str) -> Result<Vec<i64>, ResolveError> {
    args.iter()
        .flat_map(|arg| arg.as_ref().split(','))
        .filter(|part| !part.trim().is_empty())
        .map(|part| parse_id(part, entity))
        .collect()
}

/// Picks the single candidate left after a name lookup.
pub fn resolve_shared<T>(
    mut candidates: Vec<T>,
    arg: &str,
    entity: &str,
    describe: impl Fn(&T) -> String,
) -> Result<T, ResolveError> {
    match candidates.len() {
        0 => Err(ResolveError::NotFound {
            entity: entity.to_string(),
            arg: arg.to_string(),
        }),
        1 => Ok(candidates.remove(0)),
        _ => Err(ResolveError::Ambiguous {
            entity: entity.to_string(),
            arg: arg.to_string(),
            candidates: candidates.iter().map(|c| format!("  {}", describe(c))).collect(),
        }),
    }
}

/// Resolves `arg` against `items` by exact name.
fn by_name<T>(
    items: Vec<T>,
    arg: &str,
    entity: &str,
    name: impl Fn(&T) -> &str,
    id: impl Fn(&T) -> i64,
) -> Result<i64, ResolveError> {
    let matches: Vec<T> = items.into_iter().filter(|item| name(item) == arg).collect();
    let found = resolve_shared(matches, arg, entity, |item| {
        format!("{} ({})", name(item), id(item))
    })?;
    let found = id(&found);
    debug!(entity, arg, id = found, "resolved name");
    Ok(found)
}

fn numeric(arg: &str) -> Option<i64> {
    arg.trim().parse().ok()
}

pub fn system(client: &ApiClient, arg: &str) -> Result<i64, ResolveError> {
    if let Some(id) = numeric(arg) {
        return Ok(id);
    }
    let systems = client.systems(&ListQuery::filtered(arg))?;
    by_name(systems, arg, "system", |s| s.name.as_str(), |s| s.id)
}

pub fn organisation(client: &ApiClient, arg: &str) -> Result<i64, ResolveError> {
    if let Some(id) = numeric(arg) {
        return Ok(id);
    }
    let organisations = client.organisations(&ListQuery::filtered(arg))?;
    by_name(organisations, arg, "organisation", |o| o.name.as_str(), |o| o.id)
}

pub fn network(client: &ApiClient, arg: &str) -> Result<i64, ResolveError> {
    if let Some(id) = numeric(arg) {
        return Ok(id);
    }
    let networks = client.networks(&ListQuery::filtered(arg))?;
    by_name(networks, arg, "network", |n| n.name.as_str(), |n| n.id)
}

/// Domains match on their full name (`example.be`).
pub fn domain(client: &ApiClient, arg: &str) -> Result<i64, ResolveError> {
    if let Some(id) = numeric(arg) {
        return Ok(id);
    }
    let domains = client.domains(&ListQuery::filtered(arg))?;
    by_name(domains, arg, "domain", |d| d.fullname.as_str(), |d| d.id)
}

pub fn app(client: &ApiClient, arg: &str) -> Result<i64, ResolveError> {
    if let Some(id) = numeric(arg) {
        return Ok(id);
    }
    let apps = client.apps(&ListQuery::filtered(arg))?;
    by_name(apps, arg, "app", |a| a.name.as_str(), |a| a.id)
}

pub fn system_volume(client: &ApiClient, system: i64, arg: &str) -> Result<i64, ResolveError> {
    if let Some(id) = numeric(arg) {
        return Ok(id);
    }
    let volumes = client.system_volumes(system, &ListQuery::filtered(arg))?;
    by_name(volumes, arg, "volume", |v| v.name.as_str(), |v| v.id)
}

pub fn volume_group_volume(client: &ApiClient, group: i64, arg: &str) -> Result<i64, ResolveError> {
    if let Some(id) = numeric(arg) {
        return Ok(id);
    }
    let volumes = client.volume_group_volumes(group, &ListQuery::filtered(arg))?;
    by_name(volumes, arg, "volume", |v| v.name.as_str(), |v| v.id)
}

/// Resolves a network attached to a system, by link ID or network name.
pub fn system_has_network(client: &ApiClient, system: i64, arg: &str) -> Result<i64, ResolveError> {
    if let Some(id) = numeric(arg) {
        return Ok(id);
    }
    let networks = client.system_has_networks(system)?;
    by_name(networks, arg, "network", |n| n.network.name.as_str(), |n| n.id)
}

/// Resolves an IP on a system network by ID, hostname or address.
pub fn system_network_ip(
    client: &ApiClient,
    system: i64,
    has_network: i64,
    arg: &str,
) -> Result<i64, ResolveError> {
    if let Some(id) = numeric(arg) {
        return Ok(id);
    }
    let ips: Vec<_> = client
        .system_network_ips(system, has_network)?
        .into_iter()
        .filter(|ip| {
            ip.hostname == arg
                || [&ip.ipv4, &ip.public_ipv4, &ip.ipv6, &ip.public_ipv6]
                    .iter()
                    .any(|address| crate::output::ip_display(address) == arg)
        })
        .collect();
    let found = resolve_shared(ips, arg, "IP", |ip| format!("{} ({})", ip.hostname, ip.id))?;
    Ok(found.id)
}

pub fn provider_configuration(client: &ApiClient, arg: &str) -> Result<i64, ResolveError> {
    if let Some(id) = numeric(arg) {
        return Ok(id);
    }
    let configurations = client.provider_configurations()?;
    by_name(
        configurations,
        arg,
        "provider configuration",
        |c| c.name.as_str(),
        |c| c.id,
    )
}

/// Finds a zone by ID or name and returns it with its region.
pub fn zone_and_region(client: &ApiClient, arg: &str) -> Result<(i64, i64), ResolveError> {
    let wanted = numeric(arg);
    let mut found = Vec::new();
    for region in client.regions()? {
        for zone in client.zones(region.id)? {
            if wanted.map_or(zone.name == arg, |id| zone.id == id) {
                found.push((zone, region.id));
            }
        }
    }
    let (zone, region) = resolve_shared(found, arg, "zone", |(zone, region)| {
        format!("{} ({}) in region {}", zone.name, zone.id, region)
    })?;
    Ok((zone.id, region))
}

pub fn image(client: &ApiClient, region: i64, arg: &str) -> Result<i64, ResolveError> {
    if let Some(id) = numeric(arg) {
        return Ok(id);
    }
    let images = client.images(region)?;
    by_name(images, arg, "image", |i| i.name.as_str(), |i| i.id)
}

/// Resolves a domain type by ID or extension (`be`, `.be`).
pub fn domain_type(client: &ApiClient, arg: &str) -> Result<i64, ResolveError> {
    if let Some(id) = numeric(arg) {
        return Ok(id);
    }
    let extension = arg.trim_start_matches('.');
    let types: Vec<_> = client
        .domain_providers()?
        .into_iter()
        .flat_map(|provider| provider.domain_types)
        .filter(|kind| kind.extension == extension)
        .collect();
    let found = resolve_shared(types, arg, "domain type", |kind| {
        format!(".{} ({})", kind.extension, kind.id)
    })?;
    Ok(found.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[test]
    fn parses_ids_and_reports_entity() {
        assert_eq!(parse_id("42", "system").unwrap(), 42);
        let err = parse_id("web01", "system").unwrap_err();
        assert_eq!(err.to_string(), "Not a valid system ID!");
    }

    #[test]
    fn splits_comma_separated_ids() {
        let ids = split_ids(&["1,2", "3", "4,,5"], "app").unwrap();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert!(split_ids(&["1,x"], "app").is_err());
        assert!(split_ids::<&str>(&[], "app").unwrap().is_empty());
    }

    #[test]
    fn shared_resolution_needs_exactly_one_candidate() {
        let describe = |n: &(i64, &'static str)| format!("{} ({})", n.1, n.0);

        let none = resolve_shared(Vec::<(i64, &'static str)>::new(), "web", "system", describe);
        assert_eq!(none.unwrap_err().to_string(), "Unable to find system: web");

        let one = resolve_shared(vec![(4, "web")], "web", "system", describe).unwrap();
        assert_eq!(one.0, 4);

        let err = resolve_shared(vec![(4, "web"), (5, "web")], "web", "system", describe)
            .unwrap_err()
            .to_string();
        assert!(err.contains("use an ID"), "{err}");
        assert!(err.contains("web (4)") && err.contains("web (5)"), "{err}");
    }

    #[test]
    fn looks_up_names_with_exact_match() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/systems")
                .query_param("filter", "web01");
            then.status(200).json_body(json!({"systems": [
                {"id": 1, "name": "web01"},
                {"id": 2, "name": "web01-staging"}
            ]}));
        });

        let client = ApiClient::new(&server.base_url(), "key").unwrap();
        assert_eq!(system(&client, "web01").unwrap(), 1);
        assert_eq!(system(&client, "17").unwrap(), 17);
        mock.assert_hits(1);
    }

    #[test]
    fn finds_zone_across_regions() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/regions");
            then.status(200)
                .json_body(json!({"regions": [{"id": 1, "name": "BE"}, {"id": 2, "name": "NL"}]}));
        });
        server.mock(|when, then| {
            when.method(GET).path("/regions/1/zones");
            then.status(200).json_body(json!({"zones": [{"id": 10, "name": "gent"}]}));
        });
        server.mock(|when, then| {
            when.method(GET).path("/regions/2/zones");
            then.status(200)
                .json_body(json!({"zones": [{"id": 20, "name": "amsterdam"}]}));
        });

        let client = ApiClient::new(&server.base_url(), "key").unwrap();
        assert_eq!(zone_and_region(&client, "amsterdam").unwrap(), (20, 2));
        assert_eq!(zone_and_region(&client, "10").unwrap(), (10, 1));
        assert!(matches!(
            zone_and_region(&client, "paris"),
            Err(ResolveError::NotFound { .. })
        ));
    }

    #[test]
    fn domain_types_match_extension_across_providers() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/domains/providers");
            then.status(200).json_body(json!({"providers": [
                {"id": 1, "domaintypes": [{"id": 35, "extension": "be"}]},
                {"id": 2, "domaintypes": [{"id": 36, "extension": "nl"}]}
            ]}));
        });

        let client = ApiClient::new(&server.base_url(), "key").unwrap();
        assert_eq!(domain_type(&client, ".nl").unwrap(), 36);
        assert_eq!(domain_type(&client, "be").unwrap(), 35);
        assert_eq!(domain_type(&client, "99").unwrap(), 99);
        assert_eq!(
            domain_type(&client, "com").unwrap_err().to_string(),
            "Unable to find domain type: com"
        );
    }
}
