//! LAN address detection

use std::net::{IpAddr, Ipv4Addr};

use tokio::net::UdpSocket;

use crate::config::Config;

/// Find the address other machines on the LAN can reach us at.
///
/// Connecting a UDP socket sends nothing; it only makes the OS pick the
/// outbound interface. Falls back to loopback when there is no route.
pub async fn detect_local_ip() -> IpAddr {
    match probe_local_ip().await {
        Ok(ip) => ip,
        Err(e) => {
            tracing::debug!("Local IP detection failed: {}, using loopback", e);
            IpAddr::V4(Ipv4Addr::LOCALHOST)
        }
    }
}

async fn probe_local_ip() -> std::io::Result<IpAddr> {
    let socket = UdpSocket::bind("0.0.0.0:0").await?;
    socket.connect("8.8.8.8:80").await?;
    Ok(socket.local_addr()?.ip())
}

/// Base URL advertised to clients
pub fn public_base_url(config: &Config, ip: IpAddr) -> String {
    match &config.server.public_url {
        Some(url) => url.clone(),
        None => format!("http://{}:{}", ip, config.server.port),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_from_ip_and_port() {
        let mut config = Config::default();
        config.server.port = 8000;
        let ip: IpAddr = "192.168.1.42".parse().unwrap();
        assert_eq!(public_base_url(&config, ip), "http://192.168.1.42:8000");
    }

    #[test]
    fn test_base_url_override() {
        let mut config = Config::default();
        config.server.public_url = Some("https://share.example".to_string());
        let ip: IpAddr = "192.168.1.42".parse().unwrap();
        assert_eq!(public_base_url(&config, ip), "https://share.example");
    }

    #[tokio::test]
    async fn test_detect_local_ip_never_fails() {
        let ip = detect_local_ip().await;
        assert!(!ip.is_unspecified());
    }
}
