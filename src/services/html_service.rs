//! Scanner-facing HTML pages.
//!
//! Tag-originated requests come from handheld NFC scanners that render
//! whatever the server answers, so outcomes are returned as small styled
//! HTML pages instead of JSON.

use crate::models::Product;

pub fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn product_details(product: &Product) -> String {
    let rows = [
        ("ID", product.id.clone()),
        ("Name", product.name.clone()),
        ("SKU", product.sku.clone()),
        ("Batch No", product.batch_no.clone()),
        ("Expiry Date", product.expiry_date.clone()),
        ("Origin", product.origin.clone()),
        ("Location", product.location.clone()),
        ("Status", product.status.clone()),
        ("Sold", if product.sold { "Yes" } else { "No" }.to_string()),
        (
            "Sale Date",
            if product.sale_date.is_empty() {
                "N/A".to_string()
            } else {
                product.sale_date.clone()
            },
        ),
        ("Price", product.price.to_string()),
        ("Category", product.category.clone()),
        ("Quantity", product.quantity_in_stock.to_string()),
        ("UID", product.uid.clone()),
        ("Icon", product.icon.clone()),
    ];

    let body: String = rows
        .iter()
        .map(|(label, value)| {
            format!(
                "<tr class=\"border-b\"><th class=\"py-2\">{}</th><td class=\"py-2\">{}</td></tr>",
                label,
                escape(value)
            )
        })
        .collect();

    format!(
        "<div class=\"mt-4\"><h2 class=\"text-lg font-semibold\">Product Details</h2>\
         <table class=\"w-full text-left border-collapse\">{}</table></div>",
        body
    )
}

pub fn page(
    title: &str,
    message: &str,
    is_success: bool,
    product: Option<&Product>,
    transaction_hash: Option<&str>,
) -> String {
    let status_color = if is_success {
        "bg-green-100 text-green-800"
    } else {
        "bg-red-100 text-red-800"
    };
    let tx_info = transaction_hash
        .map(|hash| {
            format!(
                "<p class=\"mt-2\"><strong>Transaction Hash:</strong> <code>{}</code></p>",
                escape(hash)
            )
        })
        .unwrap_or_default();
    let details = product.map(product_details).unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <link href="https://cdn.jsdelivr.net/npm/tailwindcss@2.2.19/dist/tailwind.min.css" rel="stylesheet">
</head>
<body class="bg-gray-100 flex items-center justify-center min-h-screen">
    <div class="bg-white p-6 rounded-lg shadow-lg max-w-lg w-full {status_color}">
        <h1 class="text-2xl font-bold mb-4">{title}</h1>
        <p>{message}</p>
        {tx_info}
        {details}
    </div>
</body>
</html>"#,
        title = escape(title),
        message = escape(message),
        status_color = status_color,
        tx_info = tx_info,
        details = details,
    )
}
