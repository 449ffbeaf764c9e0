use super::form::{Field, FieldError, FormData};
use super::step::Step;
use crate::models::{Network, NetworkType, Region, Subnet};

/// Resource lists the network rules check selections against.
#[derive(Debug, Clone, Copy, Default)]
pub struct Resolved<'a> {
    pub networks: &'a [Network],
    pub subnets: &'a [Subnet],
}

/// Check the fields owned by `step`. All failing fields are reported, not just the first.
pub fn validate_step(step: Step, data: &FormData, resolved: Resolved<'_>) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();
    match step {
        Step::Identity => check_identity(data, &mut errors),
        Step::BasicConfig => check_basic_config(data, &mut errors),
        Step::Network => check_network(data, resolved, &mut errors),
        Step::Confirmation => {
            check_identity(data, &mut errors);
            check_instance_name(data, &mut errors);
            check_network(data, resolved, &mut errors);
        }
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_identity(data: &FormData, errors: &mut Vec<FieldError>) {
    if data.secret_id.trim().is_empty() {
        errors.push(FieldError::new(Field::SecretId, "SecretId is required"));
    }
    if data.secret_key.trim().is_empty() {
        errors.push(FieldError::new(Field::SecretKey, "SecretKey is required"));
    }
    check_region(data, errors);
}

fn check_region(data: &FormData, errors: &mut Vec<FieldError>) {
    match data.region.as_deref().map(str::trim) {
        None | Some("") => errors.push(FieldError::new(Field::Region, "Region is required")),
        Some(code) if Region::from_code(code).is_none() => {
            errors.push(FieldError::new(Field::Region, format!("Unknown region '{}'", code)))
        }
        Some(_) => {}
    }
}

fn check_instance_name(data: &FormData, errors: &mut Vec<FieldError>) {
    if data.instance_name.trim().is_empty() {
        errors.push(FieldError::new(Field::InstanceName, "Load balancer name is required"));
    }
}

fn check_basic_config(data: &FormData, errors: &mut Vec<FieldError>) {
    check_instance_name(data, errors);
    check_region(data, errors);
}

fn check_network(data: &FormData, resolved: Resolved<'_>, errors: &mut Vec<FieldError>) {
    let Some(network_type) = data.network_type else {
        errors.push(FieldError::new(Field::NetworkType, "Network type is required"));
        // Without a type the subnet rule is undecidable; still check the network.
        check_network_selection(data, resolved, errors);
        return;
    };

    check_network_selection(data, resolved, errors);

    if network_type == NetworkType::Private {
        match data.subnet_id.as_deref() {
            None | Some("") => {
                errors.push(FieldError::new(Field::Subnet, "A subnet is required for a private load balancer"))
            }
            Some(subnet_id) => {
                let belongs = resolved.subnets.iter().any(|s| {
                    s.id == subnet_id && Some(s.network_id.as_str()) == data.network_id.as_deref()
                });
                if !belongs {
                    errors.push(FieldError::new(
                        Field::Subnet,
                        format!("Subnet '{}' does not belong to the selected network", subnet_id),
                    ));
                }
            }
        }
    }
}

fn check_network_selection(data: &FormData, resolved: Resolved<'_>, errors: &mut Vec<FieldError>) {
    match data.network_id.as_deref() {
        None | Some("") => errors.push(FieldError::new(Field::Network, "A network is required")),
        Some(id) if !resolved.networks.iter().any(|n| n.id == id) => errors.push(FieldError::new(
            Field::Network,
            format!("Network '{}' is not available in this region", id),
        )),
        Some(_) => {}
    }
}
