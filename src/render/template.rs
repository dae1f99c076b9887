/// Page skeleton for the route map. `__NAME__` placeholders are filled by
/// [`super::map::render_html`]; `__PAYLOAD__` receives the JSON data.
pub const ROUTE_MAP_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>__TITLE__</title>
  <link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/leaflet@1.9.4/dist/leaflet.css" />
  <link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/font-awesome/4.7.0/css/font-awesome.min.css" />
  <link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/Leaflet.awesome-markers/2.0.2/leaflet.awesome-markers.css" />
  <script src="https://cdn.jsdelivr.net/npm/leaflet@1.9.4/dist/leaflet.js"></script>
  <script src="https://cdnjs.cloudflare.com/ajax/libs/Leaflet.awesome-markers/2.0.2/leaflet.awesome-markers.js"></script>
  <script src="https://cdn.jsdelivr.net/npm/leaflet-ant-path@1.3.0/dist/leaflet-ant-path.js"></script>
  <style>
    html, body { width: 100%; height: 100%; margin: 0; padding: 0; }
    #map { position: absolute; top: 0; bottom: 0; right: 0; left: 0; }
    .overlay-box {
      position: fixed; z-index: 1000; background-color: white;
      border-radius: 5px; border: 2px solid grey;
      font-family: sans-serif;
    }
    .title-box {
      top: 10px; left: 50%; transform: translateX(-50%);
      padding: 10px 20px; font-size: 18px; text-align: center;
    }
    .title-box .subtitle { font-size: 12px; }
    .title-box .generated { font-size: 10px; color: grey; }
    .legend-box { bottom: 50px; left: 50px; padding: 15px; font-size: 14px; }
  </style>
</head>
<body>
  <div id="map"></div>

  <div class="overlay-box title-box">
    <b>__TITLE__</b><br>
    <span class="subtitle">__SUBTITLE__</span><br>
    <span class="generated">Generated __GENERATED__</span>
  </div>

  <div class="overlay-box legend-box">
    <b>Vehicle Routes</b><br>
__LEGEND__
  </div>

  <script>
    const data = __PAYLOAD__;

    function escapeHtml(text) {
      return String(text)
        .replace(/&/g, "&amp;")
        .replace(/</g, "&lt;")
        .replace(/>/g, "&gt;")
        .replace(/"/g, "&quot;")
        .replace(/'/g, "&#39;");
    }

    const map = L.map("map").setView(data.center, data.zoom);
    L.tileLayer("https://{s}.basemaps.cartocdn.com/light_all/{z}/{x}/{y}{r}.png", {
      attribution: '&copy; <a href="https://www.openstreetmap.org/copyright">OpenStreetMap</a> contributors &copy; <a href="https://carto.com/attributions">CARTO</a>',
      subdomains: "abcd",
      maxZoom: 20
    }).addTo(map);

    const icons = {
      depot: { icon: "home", markerColor: "red" },
      vip: { icon: "star", markerColor: "orange" },
      standard: { icon: "info-circle", markerColor: "blue" }
    };

    data.markers.forEach(function (m) {
      const style = icons[m.kind];
      const icon = L.AwesomeMarkers.icon({
        icon: style.icon,
        prefix: "fa",
        markerColor: style.markerColor,
        iconColor: "white"
      });
      const label = m.kind === "vip" ? "★ " + m.name : m.name;
      let popup = "<b>" + escapeHtml(label) + "</b><br>Demand: " + m.demand;
      if (m.stop) {
        popup += "<br>" + escapeHtml(m.stop);
      }
      L.marker([m.lat, m.lon], { icon: icon })
        .bindPopup(popup)
        .bindTooltip(escapeHtml(label))
        .addTo(map);
    });

    data.routes.forEach(function (r) {
      L.polyline.antPath(r.coords, {
        color: r.color,
        weight: 5,
        opacity: 0.8,
        delay: 800,
        dashArray: [10, 20],
        pulseColor: "#FFFFFF"
      }).bindTooltip("Vehicle " + r.vehicle).addTo(map);
    });
  </script>
</body>
</html>
"##;
