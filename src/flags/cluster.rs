// asbackup: configuration front-end for Aerospike backups.
// Copyright 2024-2025 The asbackup Authors.

//! How to reach and log in to the cluster.

use clap::Args;

use crate::defaults;
use crate::options::{AuthMode, ClientPolicy, ClusterOptions, HostTlsPort, TlsOptions};
use crate::validate::ValidationError;

#[derive(Debug, Clone, Args)]
pub struct ClusterFlags {
    /// Seed hosts, as comma-separated `host[:tls-name][:port]`.
    #[arg(long, short = 'h', default_value = defaults::cluster::HOST)]
    pub host: String,

    /// Port for seeds that don't give one.
    #[arg(long, short = 'p', default_value_t = defaults::cluster::PORT)]
    pub port: u16,

    #[arg(long, short = 'U', default_value = "")]
    pub user: String,

    /// Password, or a `secrets:resource:key` reference.
    #[arg(long, short = 'P', default_value = "")]
    pub password: String,

    /// INTERNAL, EXTERNAL or PKI.
    #[arg(long, default_value = defaults::cluster::AUTH)]
    pub auth: AuthMode,

    /// Connect with TLS even if no other TLS flag is given.
    #[arg(long)]
    pub tls_enable: bool,

    #[arg(long)]
    pub tls_name: Option<String>,

    /// Allowed TLS protocols.
    #[arg(long)]
    pub tls_protocols: Option<String>,

    #[arg(long)]
    pub tls_cafile: Option<String>,

    #[arg(long)]
    pub tls_capath: Option<String>,

    #[arg(long)]
    pub tls_certfile: Option<String>,

    #[arg(long)]
    pub tls_keyfile: Option<String>,

    #[arg(long)]
    pub tls_keyfile_password: Option<String>,

    /// Initial connection timeout in milliseconds.
    #[arg(long, default_value_t = defaults::client_policy::TIMEOUT)]
    pub client_timeout: i64,

    /// Idle connection timeout in milliseconds.
    #[arg(long, default_value_t = defaults::client_policy::IDLE_TIMEOUT)]
    pub client_idle_timeout: i64,

    /// Login timeout in milliseconds.
    #[arg(long, default_value_t = defaults::client_policy::LOGIN_TIMEOUT)]
    pub client_login_timeout: i64,

    /// Use the nodes' alternate addresses.
    #[arg(long)]
    pub services_alternate: bool,
}

impl ClusterFlags {
    pub fn to_options(&self) -> Result<ClusterOptions, ValidationError> {
        Ok(ClusterOptions {
            seeds: HostTlsPort::parse_list(&self.host, self.port)?,
            user: self.user.clone(),
            password: self.password.clone(),
            auth_mode: self.auth,
            tls: self.tls_options(),
            services_alternate: self.services_alternate,
        })
    }

    pub fn to_client_policy(&self) -> ClientPolicy {
        ClientPolicy {
            timeout: self.client_timeout,
            idle_timeout: self.client_idle_timeout,
            login_timeout: self.client_login_timeout,
        }
    }

    fn tls_options(&self) -> Option<TlsOptions> {
        let fields = [
            &self.tls_name,
            &self.tls_protocols,
            &self.tls_cafile,
            &self.tls_capath,
            &self.tls_certfile,
            &self.tls_keyfile,
            &self.tls_keyfile_password,
        ];
        if !self.tls_enable && fields.iter().all(|field| field.is_none()) {
            return None;
        }
        let get = |field: &Option<String>| field.clone().unwrap_or_default();
        Some(TlsOptions {
            name: get(&self.tls_name),
            protocols: self
                .tls_protocols
                .clone()
                .unwrap_or_else(|| defaults::cluster::TLS_PROTOCOLS.to_owned()),
            ca_file: get(&self.tls_cafile),
            ca_path: get(&self.tls_capath),
            cert_file: get(&self.tls_certfile),
            key_file: get(&self.tls_keyfile),
            key_file_password: get(&self.tls_keyfile_password),
        })
    }
}

#[cfg(test)]
mod test {
    use clap::Parser;
    use pretty_assertions::assert_eq;

    use super::*;

    #[derive(Debug, Parser)]
    #[command(disable_help_flag = true)]
    struct Cli {
        #[command(flatten)]
        cluster: ClusterFlags,
    }

    fn parse(argv: &[&str]) -> ClusterFlags {
        Cli::try_parse_from(std::iter::once("test").chain(argv.iter().copied()))
            .unwrap()
            .cluster
    }

    #[test]
    fn tls_off_by_default() {
        assert_eq!(parse(&[]).to_options().unwrap().tls, None);
    }

    #[test]
    fn any_tls_flag_turns_it_on() {
        let tls = parse(&["--tls-cafile", "ca.pem"])
            .to_options()
            .unwrap()
            .tls
            .unwrap();
        assert_eq!(tls.ca_file, "ca.pem");
        assert_eq!(tls.protocols, defaults::cluster::TLS_PROTOCOLS);
        assert!(parse(&["--tls-enable"]).to_options().unwrap().tls.is_some());
    }

    #[test]
    fn auth_mode_ignores_case() {
        assert_eq!(parse(&["--auth", "external"]).auth, AuthMode::External);
        assert!(Cli::try_parse_from(["test", "--auth", "kerberos"]).is_err());
    }

    #[test]
    fn bad_seed() {
        let err = parse(&["-h", "db:tls:notaport"]).to_options().unwrap_err();
        assert!(matches!(err, ValidationError::InvalidSeed { .. }));
    }
}
