use aurbump_common::{Pkgbuild, Version};

const POOL: &str = "https://repo.nordvpn.com/deb/nordvpn/debian/pool/main";

/// Arch Linux architecture and the matching debian architecture
const ARCHITECTURES: &[(&str, &str)] = &[
    ("i686", "i386"),
    ("x86_64", "amd64"),
    ("armv7h", "armhf"),
    ("aarch64", "aarch64"),
];

fn quoted(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| format!("'{}'", item)).collect()
}

/// The nordvpn-bin PKGBUILD for the given upstream version.
///
/// Checksums are left empty and filled in by `updpkgsums`.
pub fn nordvpn_bin(version: &Version) -> Pkgbuild {
    let mut pkgbuild = Pkgbuild::new();

    pkgbuild.add_maintainer("metiis", "aur at metiis dot com");
    pkgbuild.add_maintainer("Julio Gutierrez", "bubuntux at gmail dot com");
    pkgbuild.add_maintainer("Martoko", "mbastholm at gmail dot com");

    let arches = ARCHITECTURES.iter().map(|(arch, _)| *arch).collect::<Vec<_>>();

    pkgbuild.add_attribute("pkgname", "nordvpn-bin");
    pkgbuild.add_attribute("pkgver", version.to_pkgver());
    pkgbuild.add_attribute("pkgrel", "1");
    pkgbuild.add_attribute("pkgdesc", "\"NordVPN CLI tool for Linux\"");
    pkgbuild.add_attribute("arch", quoted(&arches));
    pkgbuild.add_attribute("url", "\"https://nordvpn.com/download/linux/\"");
    pkgbuild.add_attribute("license", quoted(&["custom"]));
    pkgbuild.add_attribute(
        "depends",
        quoted(&["net-tools", "libxslt", "iptables", "procps", "iproute2"]),
    );
    pkgbuild.add_attribute(
        "optdepends",
        quoted(&[
            "wireguard-tools: nordlynx support",
            "wireguard-arch: nordlynx support",
        ]),
    );
    pkgbuild.add_attribute("provides", quoted(&["nordvpn"]));
    pkgbuild.add_attribute("conflicts", quoted(&["openvpn-nordvpn"]));
    pkgbuild.add_attribute("install", "nordvpn-bin.install");

    // the pool uses upstream versions, so undo the underscore from pkgver
    for (arch, deb_arch) in ARCHITECTURES {
        pkgbuild.add_attribute(
            format!("source_{}", arch),
            vec![format!(
                "\"{}/nordvpn_${{pkgver//_/-}}_{}.deb\"",
                POOL, deb_arch
            )],
        );
    }
    for (arch, _) in ARCHITECTURES {
        pkgbuild.add_attribute(format!("sha256sums_{}", arch), Vec::<String>::new());
    }

    pkgbuild.add_function(
        "package",
        [
            "bsdtar -O -xf *.deb data.tar.xz | bsdtar -C \"${pkgdir}\" -xJf -",
            "",
            "mv \"${pkgdir}/usr/sbin/nordvpnd\" \"${pkgdir}/usr/bin\"",
            "rm -r \"${pkgdir}/etc/init.d\"",
            "rm -r \"${pkgdir}/usr/sbin\"",
        ],
    );

    pkgbuild
}
